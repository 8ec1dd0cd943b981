mod page;
pub use self::page::{PageRequest, PageResponse, ParamStyle, DEFAULT_PAGE_SIZE};
