//! Tool result content normalization
//!
//! Providers return heterogeneous content items. Each raw item is resolved
//! once into a capability: a typed MCP content item that exports a canonical
//! map, or an attribute bag that exports its fields as-is. Both keep every
//! field present on the source item.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized tool output: one plain map per content item, in provider order
pub type ToolResult = Vec<Map<String, Value>>;

/// Capability of exporting a content item to a plain serializable map
pub trait ExportMapping {
    fn export(&self) -> Map<String, Value>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Image or audio payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLink {
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub resource: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A content item in one of the shapes defined by MCP
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Text(TextContent),
    Image(BinaryContent),
    Audio(BinaryContent),
    ResourceLink(ResourceLink),
    Resource(EmbeddedResource),
}

impl ContentItem {
    /// Parse a known MCP content shape, or `None` if the value is anything else
    pub fn from_value(value: &Value) -> Option<Self> {
        let kind = value.get("type")?.as_str()?;
        let item = match kind {
            "text" => Self::Text(serde_json::from_value(value.clone()).ok()?),
            "image" => Self::Image(serde_json::from_value(value.clone()).ok()?),
            "audio" => Self::Audio(serde_json::from_value(value.clone()).ok()?),
            "resource_link" => Self::ResourceLink(serde_json::from_value(value.clone()).ok()?),
            "resource" => Self::Resource(serde_json::from_value(value.clone()).ok()?),
            _ => return None,
        };
        Some(item)
    }

    /// Text payload, if this is a text item
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(&t.text),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        let value = match self {
            Self::Text(t) => serde_json::to_value(t),
            Self::Image(b) | Self::Audio(b) => serde_json::to_value(b),
            Self::ResourceLink(r) => serde_json::to_value(r),
            Self::Resource(r) => serde_json::to_value(r),
        };
        // Structs of strings and JSON values always serialize
        value.unwrap_or(Value::Null)
    }
}

impl ExportMapping for ContentItem {
    fn export(&self) -> Map<String, Value> {
        match self.to_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// Arbitrary content shape, carried field for field
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBag(pub Map<String, Value>);

impl ExportMapping for AttributeBag {
    fn export(&self) -> Map<String, Value> {
        self.0.clone()
    }
}

/// A raw provider content item after capability resolution
#[derive(Debug, Clone, PartialEq)]
pub enum RawContent {
    Typed(ContentItem),
    Untyped(AttributeBag),
}

impl RawContent {
    /// Resolve the capability of a raw item
    pub fn resolve(value: Value) -> Self {
        if let Some(item) = ContentItem::from_value(&value) {
            return Self::Typed(item);
        }
        match value {
            Value::Object(map) => Self::Untyped(AttributeBag(map)),
            other => {
                let mut map = Map::new();
                map.insert("type".to_string(), Value::String("value".to_string()));
                map.insert("value".to_string(), other);
                Self::Untyped(AttributeBag(map))
            }
        }
    }

    /// The export capability selected for this item
    pub fn exporter(&self) -> &dyn ExportMapping {
        match self {
            Self::Typed(item) => item as &dyn ExportMapping,
            Self::Untyped(bag) => bag as &dyn ExportMapping,
        }
    }

    /// Text payload, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Typed(item) => item.as_text(),
            Self::Untyped(bag) => bag.0.get("text").and_then(|t| t.as_str()),
        }
    }
}

/// Normalize raw content items into plain maps, preserving order
pub fn normalize(items: &[RawContent]) -> ToolResult {
    items.iter().map(|item| item.exporter().export()).collect()
}
