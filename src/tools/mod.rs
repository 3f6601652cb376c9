//! Tool definitions, the per-session catalog, execution and result content

mod catalog;
mod content;
mod definition;
mod executor;

pub use catalog::ToolCatalog;
pub use content::{
    AttributeBag, BinaryContent, ContentItem, EmbeddedResource, ExportMapping, RawContent, ResourceLink, TextContent,
    ToolResult, normalize,
};
pub use definition::{DEFAULT_DESCRIPTION, Parameter, Tool};
pub use executor::ToolExecutor;
