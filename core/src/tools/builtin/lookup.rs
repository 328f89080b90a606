//! Single-item lookups by Pixabay id
//!
//! Both tools delegate to the search endpoints with `id` as the only filter,
//! so the outbound request is the same as a search for that id.

use crate::error::Result;
use crate::impl_tool_factory;
use crate::pixabay::params::{IdParams, ImageSearchParams, VideoSearchParams};
use crate::pixabay::PixabayClient;
use crate::tools::builtin::search::object_schema;
use crate::tools::{Tool, ToolCall, ToolExample, ToolResult};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn id_schema(kind: &str) -> Value {
    let mut properties = Map::new();
    properties.insert(
        "id".to_string(),
        json!({
            "type": "string",
            "description": format!("Pixabay {} id", kind)
        }),
    );
    object_schema(properties, &["id"])
}

/// Fetch one image by id
pub struct GetImageByIdTool {
    client: Arc<PixabayClient>,
}

impl GetImageByIdTool {
    pub fn new(client: Arc<PixabayClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetImageByIdTool {
    fn name(&self) -> &str {
        "get_image_by_id"
    }

    fn description(&self) -> &str {
        "Get a single Pixabay image by its id. Returns the raw Pixabay JSON response."
    }

    fn parameters_schema(&self) -> Value {
        id_schema("image")
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        self.client.api_key()?;

        let params: IdParams = call.arguments()?;
        let search = ImageSearchParams::by_id(params.validated_id()?);

        let payload = self.client.search_images(&search).await?;
        let text = serde_json::to_string_pretty(&payload)?;
        Ok(ToolResult::success(call.id.as_str(), text).with_data(payload))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample {
            description: "Look up image 195893".to_string(),
            parameters: json!({"id": "195893"}),
            expected_result: "Pixabay JSON with a single image hit".to_string(),
        }]
    }
}

/// Fetch one video by id
pub struct GetVideoByIdTool {
    client: Arc<PixabayClient>,
}

impl GetVideoByIdTool {
    pub fn new(client: Arc<PixabayClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetVideoByIdTool {
    fn name(&self) -> &str {
        "get_video_by_id"
    }

    fn description(&self) -> &str {
        "Get a single Pixabay video by its id. Returns the raw Pixabay JSON response."
    }

    fn parameters_schema(&self) -> Value {
        id_schema("video")
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        self.client.api_key()?;

        let params: IdParams = call.arguments()?;
        let search = VideoSearchParams::by_id(params.validated_id()?);

        let payload = self.client.search_videos(&search).await?;
        let text = serde_json::to_string_pretty(&payload)?;
        Ok(ToolResult::success(call.id.as_str(), text).with_data(payload))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample {
            description: "Look up video 125".to_string(),
            parameters: json!({"id": "125"}),
            expected_result: "Pixabay JSON with a single video hit".to_string(),
        }]
    }
}

impl_tool_factory!(
    GetImageByIdToolFactory,
    GetImageByIdTool,
    "get_image_by_id",
    "Get a single Pixabay image by its id"
);

impl_tool_factory!(
    GetVideoByIdToolFactory,
    GetVideoByIdTool,
    "get_video_by_id",
    "Get a single Pixabay video by its id"
);
