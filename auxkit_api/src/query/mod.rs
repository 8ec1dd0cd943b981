mod common;
pub use self::common::{Query, QueryCommon, SortDirection};

mod page;
pub use self::page::PageQuery;
