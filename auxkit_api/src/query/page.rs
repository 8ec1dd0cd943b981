use url::Url;

use super::{
    common::{QueryCommon, SortDirection},
    Query,
};

/// Query for a generic paginated list endpoint.
///
/// Filters are sent verbatim as repeated query pairs, in insertion order,
/// after the page cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PageQuery {
    pub common: QueryCommon,
    pub filters: Vec<(String, String)>,
    pub sort_by: Option<String>,
}

impl Query for PageQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        for (key, value) in self.filters.iter() {
            url.query_pairs_mut().append_pair(key, value);
        }
        if let Some(sort_by) = &self.sort_by {
            url.query_pairs_mut().append_pair(
                "sortBy",
                format!(
                    "{}{}",
                    match self.common.sort_direction {
                        SortDirection::Asc => "",
                        SortDirection::Desc => "-",
                    },
                    sort_by
                )
                .as_str(),
            );
        }
        url
    }
}

impl PageQuery {
    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.filters.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_filters(mut self, filters: &[(String, String)]) -> Self {
        self.filters.extend_from_slice(filters);
        self
    }

    pub fn with_sort_by(mut self, sort_by: &str) -> Self {
        self.sort_by = Some(sort_by.to_string());
        self
    }
}
