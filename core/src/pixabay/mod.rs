//! Pixabay API access: typed parameters, query building and the HTTP client

pub mod client;
pub mod params;
pub mod query;

pub use client::{redact_url, MediaKind, PixabayClient};
pub use params::{
    parse_arguments, IdParams, ImageSearchParams, ImageType, Order, Orientation, VideoSearchParams,
    VideoType,
};
pub use query::{normalize, to_query, QueryPairs};
