//! Catalog rendering for the routing prompt
//!
//! One line per tool, 1-indexed, in catalog order:
//!
//! ```text
//! 1. minecraft_move_to(x*:number, y*:number, z*:number) - Move the bot to a position
//! 2. minecraft_get_status(none) - Get bot status
//! ```
//!
//! A trailing `*` marks a required parameter.

use crate::tools::{Parameter, Tool, ToolCatalog};

/// Rendering of an empty catalog
pub const NO_TOOLS: &str = "No tools available.";

/// Render the catalog into a compact textual description
pub fn render(catalog: &ToolCatalog) -> String {
    if catalog.is_empty() {
        return NO_TOOLS.to_string();
    }

    catalog
        .iter()
        .enumerate()
        .map(|(i, tool)| render_tool(i + 1, tool))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_tool(index: usize, tool: &Tool) -> String {
    let params = tool.parameters();
    let params = if params.is_empty() {
        "none".to_string()
    } else {
        params.iter().map(render_parameter).collect::<Vec<_>>().join(", ")
    };
    format!(
        "{}. {}({}) - {}",
        index,
        single_line(&tool.name),
        params,
        single_line(&tool.description)
    )
}

/// Collapse whitespace runs (including newlines) to single spaces
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn render_parameter(param: &Parameter) -> String {
    let marker = if param.required { "*" } else { "" };
    format!("{}{}:{}", single_line(&param.name), marker, single_line(&param.param_type))
}
