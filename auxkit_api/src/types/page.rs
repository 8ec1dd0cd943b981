//! Page request and response shapes shared by every paginated endpoint.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not supply an initial request.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// One slice of a paginated collection.
///
/// `offset` is a zero-based page index, not an item offset. Both the long
/// (`offset`/`pageSize`) and the short (`o`/`s`) wire spellings deserialize
/// into the same value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(alias = "o")]
    pub offset: u64,
    #[serde(alias = "s")]
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(offset: u64, page_size: u64) -> Self {
        Self { offset, page_size }
    }

    /// The request for the following page; the page size is unchanged.
    pub fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(1),
            page_size: self.page_size,
        }
    }
}

/// A single page as reported by the responder.
///
/// Every field is optional on the wire. `items` accepts the common envelope
/// names (`items`, `list`, `data`, `records`); `pageSize` may differ from the
/// size that was requested.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageResponse<T> {
    #[serde(
        default,
        alias = "list",
        alias = "data",
        alias = "records",
        skip_serializing_if = "Option::is_none"
    )]
    pub items: Option<Vec<T>>,
    #[serde(default)]
    pub total: u64,
    #[serde(default, alias = "s")]
    pub page_size: u64,
}

impl<T> Default for PageResponse<T> {
    fn default() -> Self {
        Self {
            items: None,
            total: 0,
            page_size: 0,
        }
    }
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page_size: u64) -> Self {
        Self {
            items: Some(items),
            total,
            page_size,
        }
    }

    /// Number of items carried by this page. An absent list counts as zero.
    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

/// Query parameter spelling for the page cursor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ParamStyle {
    /// `offset` and `pageSize`.
    #[default]
    Long,
    /// `o` and `s`.
    Short,
}

impl ParamStyle {
    pub fn offset_key(self) -> &'static str {
        match self {
            ParamStyle::Long => "offset",
            ParamStyle::Short => "o",
        }
    }

    pub fn page_size_key(self) -> &'static str {
        match self {
            ParamStyle::Long => "pageSize",
            ParamStyle::Short => "s",
        }
    }
}

impl std::fmt::Display for ParamStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ParamStyle::Long => "long",
                ParamStyle::Short => "short",
            }
        )
    }
}

impl FromStr for ParamStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "long" => Ok(ParamStyle::Long),
            "short" => Ok(ParamStyle::Short),
            _ => Err(()),
        }
    }
}
