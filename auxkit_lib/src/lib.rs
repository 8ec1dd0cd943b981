//! Library layer for auxkit: page traversal, deep value resolution, and enum
//! reflection, plus a cached page client and configuration.
//!
//! The three utilities in [`paging`], [`resolve`], and [`reflect`] are
//! independent of each other and never touch the network; [`paging`] only
//! borrows the page wire types from `auxkit_api`.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod paging;
pub mod reflect;
pub mod resolve;
pub mod validation;

pub use auxkit_api;
pub use auxkit_api::types;
pub use auxkit_api::{PageQuery, Query, SortDirection};

pub use client::CachedClient;
pub use config::Config;
pub use error::AuxkitError;
pub use paging::{loop_page_all, loop_page_all_sync, PageLoop};
pub use reflect::{
    enum_comment_to_pair_array, enum_to_output, find_enum_comment, find_enum_value, CommentMap,
    EnumDescriptor, EnumOutput, EnumValue, LabelPair, ReflectEnum,
};
pub use resolve::{deep_resolve, try_deep_resolve, ResolveOptions};
