//! Image and video search tools

use crate::error::Result;
use crate::impl_tool_factory;
use crate::pixabay::params::{
    ImageSearchParams, ImageType, Order, Orientation, VideoSearchParams, VideoType, CATEGORIES,
    COLORS, LANGUAGES, MAX_PER_PAGE, MAX_QUERY_CHARS, MIN_PER_PAGE,
};
use crate::pixabay::PixabayClient;
use crate::tools::{Tool, ToolCall, ToolExample, ToolResult};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Properties shared by the image and video search schemas
pub(crate) fn shared_properties() -> Map<String, Value> {
    let properties = json!({
        "q": {
            "type": "string",
            "description": "Search term. If omitted, all media is returned. Spaces are allowed.",
            "maxLength": MAX_QUERY_CHARS
        },
        "lang": {
            "type": "string",
            "description": "Language code of the search term",
            "enum": LANGUAGES,
            "default": "en"
        },
        "id": {
            "type": "string",
            "description": "Retrieve an individual item by its Pixabay id"
        },
        "category": {
            "type": "string",
            "description": "Filter results by category",
            "enum": CATEGORIES
        },
        "min_width": {
            "type": "integer",
            "description": "Minimum width in pixels",
            "minimum": 0,
            "default": 0
        },
        "min_height": {
            "type": "integer",
            "description": "Minimum height in pixels",
            "minimum": 0,
            "default": 0
        },
        "editors_choice": {
            "type": "boolean",
            "description": "Only return items that received an Editor's Choice award",
            "default": false
        },
        "safesearch": {
            "type": "boolean",
            "description": "Only return items suitable for all ages",
            "default": false
        },
        "order": {
            "type": "string",
            "description": "How the results should be ordered",
            "enum": Order::VALUES,
            "default": "popular"
        },
        "page": {
            "type": "integer",
            "description": "Page number of the paginated results",
            "minimum": 1,
            "default": 1
        },
        "per_page": {
            "type": "integer",
            "description": "Number of results per page",
            "minimum": MIN_PER_PAGE,
            "maximum": MAX_PER_PAGE,
            "default": 20
        }
    });

    match properties {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub(crate) fn object_schema(properties: Map<String, Value>, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

fn payload_result(call: &ToolCall, payload: Value) -> Result<ToolResult> {
    let text = serde_json::to_string_pretty(&payload)?;
    Ok(ToolResult::success(call.id.as_str(), text).with_data(payload))
}

/// Search Pixabay images
pub struct SearchImagesTool {
    client: Arc<PixabayClient>,
}

impl SearchImagesTool {
    pub fn new(client: Arc<PixabayClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchImagesTool {
    fn name(&self) -> &str {
        "search_images"
    }

    fn description(&self) -> &str {
        "Search Pixabay for royalty-free images.\n\
         All parameters are optional; unset filters are not sent. Returns the raw \
         Pixabay JSON response (total, totalHits and a list of hits with preview, \
         web-format and large image URLs)."
    }

    fn parameters_schema(&self) -> Value {
        let mut properties = shared_properties();
        properties.insert(
            "image_type".to_string(),
            json!({
                "type": "string",
                "description": "Filter results by image type",
                "enum": ImageType::VALUES,
                "default": "all"
            }),
        );
        properties.insert(
            "orientation".to_string(),
            json!({
                "type": "string",
                "description": "Whether an image is wider than it is tall, or taller than it is wide",
                "enum": Orientation::VALUES,
                "default": "all"
            }),
        );
        properties.insert(
            "colors".to_string(),
            json!({
                "type": "string",
                "description": format!(
                    "Filter images by color properties. A comma separated list of: {}",
                    COLORS.join(", ")
                )
            }),
        );
        object_schema(properties, &[])
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        self.client.api_key()?;

        let params: ImageSearchParams = call.arguments()?;
        params.validate()?;

        let payload = self.client.search_images(&params).await?;
        payload_result(&call, payload)
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![
            ToolExample {
                description: "Wide editor's choice landscape photos".to_string(),
                parameters: json!({
                    "q": "mountain landscape",
                    "orientation": "horizontal",
                    "min_width": 1920,
                    "editors_choice": true
                }),
                expected_result: "Pixabay JSON with matching image hits".to_string(),
            },
            ToolExample {
                description: "Transparent vector icons, 50 per page".to_string(),
                parameters: json!({
                    "q": "rocket",
                    "image_type": "vector",
                    "colors": "transparent",
                    "per_page": 50
                }),
                expected_result: "Pixabay JSON with up to 50 vector hits".to_string(),
            },
        ]
    }
}

/// Search Pixabay videos
pub struct SearchVideosTool {
    client: Arc<PixabayClient>,
}

impl SearchVideosTool {
    pub fn new(client: Arc<PixabayClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchVideosTool {
    fn name(&self) -> &str {
        "search_videos"
    }

    fn description(&self) -> &str {
        "Search Pixabay for royalty-free videos.\n\
         All parameters are optional; unset filters are not sent. Returns the raw \
         Pixabay JSON response with large, medium, small and tiny rendition URLs \
         for each hit."
    }

    fn parameters_schema(&self) -> Value {
        let mut properties = shared_properties();
        properties.insert(
            "video_type".to_string(),
            json!({
                "type": "string",
                "description": "Filter results by video type",
                "enum": VideoType::VALUES,
                "default": "all"
            }),
        );
        object_schema(properties, &[])
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        self.client.api_key()?;

        let params: VideoSearchParams = call.arguments()?;
        params.validate()?;

        let payload = self.client.search_videos(&params).await?;
        payload_result(&call, payload)
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample {
            description: "Safe-for-work animated ocean clips, newest first".to_string(),
            parameters: json!({
                "q": "ocean waves",
                "video_type": "animation",
                "safesearch": true,
                "order": "latest"
            }),
            expected_result: "Pixabay JSON with matching video hits".to_string(),
        }]
    }
}

impl_tool_factory!(
    SearchImagesToolFactory,
    SearchImagesTool,
    "search_images",
    "Search Pixabay for royalty-free images"
);

impl_tool_factory!(
    SearchVideosToolFactory,
    SearchVideosTool,
    "search_videos",
    "Search Pixabay for royalty-free videos"
);
