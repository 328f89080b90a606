//! Built-in tools

pub mod lookup;
pub mod search;

pub use lookup::{
    GetImageByIdTool, GetImageByIdToolFactory, GetVideoByIdTool, GetVideoByIdToolFactory,
};
pub use search::{
    SearchImagesTool, SearchImagesToolFactory, SearchVideosTool, SearchVideosToolFactory,
};
