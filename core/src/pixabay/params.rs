//! Typed request parameters for the Pixabay search endpoints
//!
//! Tool arguments arrive as an untyped JSON object. They are parsed into one
//! of the structs below and validated before any request is built; absent,
//! `null` and `""` values all parse to `None` and are never sent upstream.

use crate::error::{Result, ToolError};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum length of the `q` search term, in characters
pub const MAX_QUERY_CHARS: usize = 100;

/// Smallest accepted `per_page`
pub const MIN_PER_PAGE: u32 = 3;

/// Largest accepted `per_page`
pub const MAX_PER_PAGE: u32 = 200;

pub const LANGUAGES: &[&str] = &[
    "cs", "da", "de", "en", "es", "fr", "id", "it", "hu", "nl", "no", "pl", "pt", "ro", "sk", "fi",
    "sv", "tr", "vi", "th", "bg", "ru", "el", "ja", "ko", "zh",
];

pub const CATEGORIES: &[&str] = &[
    "backgrounds",
    "fashion",
    "nature",
    "science",
    "education",
    "feelings",
    "health",
    "people",
    "religion",
    "places",
    "animals",
    "industry",
    "computer",
    "food",
    "sports",
    "transportation",
    "travel",
    "buildings",
    "business",
    "music",
];

pub const COLORS: &[&str] = &[
    "grayscale",
    "transparent",
    "red",
    "orange",
    "yellow",
    "green",
    "turquoise",
    "blue",
    "lilac",
    "pink",
    "white",
    "gray",
    "black",
    "brown",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    All,
    Photo,
    Illustration,
    Vector,
}

impl ImageType {
    pub const VALUES: &'static [&'static str] = &["all", "photo", "illustration", "vector"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    All,
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const VALUES: &'static [&'static str] = &["all", "horizontal", "vertical"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    All,
    Film,
    Animation,
}

impl VideoType {
    pub const VALUES: &'static [&'static str] = &["all", "film", "animation"];
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Popular,
    Latest,
}

impl Order {
    pub const VALUES: &'static [&'static str] = &["popular", "latest"];
}

/// Parameters accepted by the image search endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageSearchParams {
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, deserialize_with = "trimmed_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub image_type: Option<ImageType>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    /// Comma separated list of colour names, stored without blanks
    #[serde(default, deserialize_with = "color_list", skip_serializing_if = "Option::is_none")]
    pub colors: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub editors_choice: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub safesearch: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Parameters accepted by the video search endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoSearchParams {
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, deserialize_with = "trimmed_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub video_type: Option<VideoType>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub editors_choice: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub safesearch: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Arguments of the by-id lookup tools
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdParams {
    pub id: String,
}

impl ImageSearchParams {
    /// Search for a single image by its Pixabay id
    pub fn by_id<S: Into<String>>(id: S) -> Self {
        Self {
            id: Some(id.into().trim().to_string()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_shared(
            self.q.as_deref(),
            self.lang.as_deref(),
            self.category.as_deref(),
            self.page,
            self.per_page,
        )?;

        if let Some(colors) = &self.colors {
            for color in colors.split(',') {
                check_allowed("colors", color, COLORS)?;
            }
        }

        Ok(())
    }
}

impl VideoSearchParams {
    /// Search for a single video by its Pixabay id
    pub fn by_id<S: Into<String>>(id: S) -> Self {
        Self {
            id: Some(id.into().trim().to_string()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_shared(
            self.q.as_deref(),
            self.lang.as_deref(),
            self.category.as_deref(),
            self.page,
            self.per_page,
        )
    }
}

impl IdParams {
    /// The id with surrounding whitespace removed; an empty id is rejected
    pub fn validated_id(&self) -> Result<&str> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ToolError::invalid("id must be a non-empty string").into());
        }
        Ok(id)
    }
}

/// Parse a tool argument object into typed parameters
///
/// A missing or `null` argument object is treated as `{}`.
pub fn parse_arguments<T: DeserializeOwned>(arguments: &Value) -> Result<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        Value::Object(_) => arguments.clone(),
        other => {
            return Err(ToolError::invalid(format!(
                "arguments must be an object, got {}",
                json_type_name(other)
            ))
            .into())
        }
    };

    serde_json::from_value(arguments).map_err(|e| ToolError::invalid(e.to_string()).into())
}

fn validate_shared(
    q: Option<&str>,
    lang: Option<&str>,
    category: Option<&str>,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Result<()> {
    if let Some(q) = q {
        let chars = q.chars().count();
        if chars > MAX_QUERY_CHARS {
            return Err(ToolError::invalid(format!(
                "q must be at most {} characters, got {}",
                MAX_QUERY_CHARS, chars
            ))
            .into());
        }
    }

    if let Some(lang) = lang {
        check_allowed("lang", lang, LANGUAGES)?;
    }

    if let Some(category) = category {
        check_allowed("category", category, CATEGORIES)?;
    }

    if page == Some(0) {
        return Err(ToolError::invalid("page must be at least 1").into());
    }

    if let Some(per_page) = per_page {
        if !(MIN_PER_PAGE..=MAX_PER_PAGE).contains(&per_page) {
            return Err(ToolError::invalid(format!(
                "per_page must be between {} and {}, got {}",
                MIN_PER_PAGE, MAX_PER_PAGE, per_page
            ))
            .into());
        }
    }

    Ok(())
}

fn check_allowed(field: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ToolError::invalid(format!(
            "{} must be one of [{}], got '{}'",
            field,
            allowed.join(", "),
            value
        ))
        .into())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Treat a missing, `null` or empty-string value as absent
fn blank_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(de::Error::custom),
    }
}

/// Trim an id; a blank id is treated as absent
fn trimmed_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id: Option<String> = blank_as_none(deserializer)?;
    Ok(id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty()))
}

/// Normalize `"red, blue"` to `"red,blue"`, dropping empty entries
fn color_list<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let colors: Option<String> = blank_as_none(deserializer)?;
    Ok(colors
        .map(|colors| {
            colors
                .split(',')
                .map(str::trim)
                .filter(|color| !color.is_empty())
                .collect::<Vec<_>>()
                .join(",")
        })
        .filter(|colors| !colors.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_values_parse_as_none() {
        let params: ImageSearchParams = parse_arguments(&json!({
            "q": "",
            "lang": null,
            "image_type": "",
            "min_width": null,
            "editors_choice": ""
        }))
        .unwrap();
        assert_eq!(params, ImageSearchParams::default());
    }

    #[test]
    fn test_null_arguments_are_an_empty_object() {
        let params: VideoSearchParams = parse_arguments(&Value::Null).unwrap();
        assert_eq!(params, VideoSearchParams::default());
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        let err = parse_arguments::<ImageSearchParams>(&json!(["q"])).unwrap_err();
        assert!(err.to_string().contains("arguments must be an object, got array"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_arguments::<ImageSearchParams>(&json!({"video_type": "film"})).unwrap_err();
        assert!(err.to_string().starts_with("Invalid tool parameters"));
        assert!(err.to_string().contains("video_type"));
    }

    #[test]
    fn test_enum_outside_allowed_values_rejected() {
        let err =
            parse_arguments::<ImageSearchParams>(&json!({"orientation": "diagonal"})).unwrap_err();
        assert!(err.to_string().contains("diagonal"));
    }

    #[test]
    fn test_wrong_scalar_type_rejected() {
        assert!(parse_arguments::<ImageSearchParams>(&json!({"min_width": "wide"})).is_err());
        assert!(parse_arguments::<ImageSearchParams>(&json!({"min_width": -1})).is_err());
        assert!(parse_arguments::<ImageSearchParams>(&json!({"safesearch": "yes"})).is_err());
    }

    #[test]
    fn test_per_page_bounds() {
        for per_page in [3, 20, 200] {
            let params = ImageSearchParams {
                per_page: Some(per_page),
                ..Default::default()
            };
            assert!(params.validate().is_ok(), "per_page {} should pass", per_page);
        }

        for per_page in [0, 2, 201, 500] {
            let params = VideoSearchParams {
                per_page: Some(per_page),
                ..Default::default()
            };
            let err = params.validate().unwrap_err();
            assert!(err.to_string().contains("per_page must be between 3 and 200"));
        }
    }

    #[test]
    fn test_page_must_be_positive() {
        let params = ImageSearchParams {
            page: Some(0),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_query_length_limit_counts_characters() {
        let params = ImageSearchParams {
            q: Some("é".repeat(MAX_QUERY_CHARS)),
            ..Default::default()
        };
        assert!(params.validate().is_ok());

        let params = ImageSearchParams {
            q: Some("a".repeat(MAX_QUERY_CHARS + 1)),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_lang_category_and_colors_checked() {
        let ok: ImageSearchParams = parse_arguments(&json!({
            "lang": "de",
            "category": "nature",
            "colors": "red, blue,grayscale"
        }))
        .unwrap();
        assert!(ok.validate().is_ok());

        let bad_lang = VideoSearchParams {
            lang: Some("klingon".to_string()),
            ..Default::default()
        };
        assert!(bad_lang.validate().is_err());

        let bad_color = ImageSearchParams {
            colors: Some("red,plaid".to_string()),
            ..Default::default()
        };
        let err = bad_color.validate().unwrap_err();
        assert!(err.to_string().contains("plaid"));
    }

    #[test]
    fn test_colors_are_normalized() {
        let params: ImageSearchParams =
            parse_arguments(&json!({"colors": " red, blue ,,grayscale "})).unwrap();
        assert_eq!(params.colors.as_deref(), Some("red,blue,grayscale"));

        let params: ImageSearchParams = parse_arguments(&json!({"colors": " , "})).unwrap();
        assert_eq!(params.colors, None);
    }

    #[test]
    fn test_search_id_is_trimmed() {
        let params: VideoSearchParams = parse_arguments(&json!({"id": " 125 "})).unwrap();
        assert_eq!(params.id.as_deref(), Some("125"));

        let params: ImageSearchParams = parse_arguments(&json!({"id": "   "})).unwrap();
        assert_eq!(params.id, None);

        assert_eq!(ImageSearchParams::by_id(" 7 ").id.as_deref(), Some("7"));
    }

    #[test]
    fn test_id_params() {
        let params: IdParams = parse_arguments(&json!({"id": " 195893 "})).unwrap();
        assert_eq!(params.validated_id().unwrap(), "195893");

        let params: IdParams = parse_arguments(&json!({"id": ""})).unwrap();
        assert!(params.validated_id().is_err());

        assert!(parse_arguments::<IdParams>(&json!({"id": 195893})).is_err());
        assert!(parse_arguments::<IdParams>(&json!({})).is_err());
    }
}
