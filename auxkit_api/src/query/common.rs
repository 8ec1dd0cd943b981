//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`SortDirection`].

use std::str::FromStr;

use url::Url;

use crate::types::{PageRequest, ParamStyle};

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for the page cursor and sort direction.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Returns the common query fields.
    fn common(&self) -> &QueryCommon;

    /// The page cursor this query currently points at.
    fn page_request(&self) -> PageRequest {
        self.common().page
    }

    /// Points the query at the given page.
    fn with_page_request(mut self, page: PageRequest) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page;
        self
    }

    /// Sets the zero-based page index.
    fn with_offset(mut self, offset: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page.offset = offset;
        self
    }

    /// Sets the number of results per page.
    fn with_page_size(mut self, page_size: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page.page_size = page_size;
        self
    }

    /// Selects the query parameter spelling for the page cursor.
    fn with_param_style(mut self, style: ParamStyle) -> Self
    where
        Self: Sized,
    {
        self.get_common().style = style;
        self
    }

    /// Sets the sort direction (ascending or descending).
    fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self
    where
        Self: Sized,
    {
        self.get_common().sort_direction = sort_direction;
        self
    }
}

/// Sort order for API results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Ascending order. This is the default.
    #[default]
    Asc = 0,
    /// Descending order, sent as a `-` prefix on the sort field.
    Desc = 1,
}
impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" | "asc" => Ok(SortDirection::Asc),
            "1" | "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Fields shared by all query types: page cursor, parameter style, and sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct QueryCommon {
    /// Page cursor. Defaults to offset 0 with the default page size.
    pub page: PageRequest,
    /// Parameter spelling. Defaults to `offset`/`pageSize`.
    pub style: ParamStyle,
    /// Sort direction. Defaults to ascending.
    pub sort_direction: SortDirection,
}

impl QueryCommon {
    /// Appends the page cursor parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair(self.style.offset_key(), &self.page.offset.to_string())
            .append_pair(self.style.page_size_key(), &self.page.page_size.to_string());
        url
    }
}
