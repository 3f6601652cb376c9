//! Prompt System - catalog rendering and routing prompt texts

mod formatter;
mod templates;

pub use formatter::{NO_TOOLS, render};
pub use templates::{SYSTEM_PROMPT, correction_prompt, routing_prompt};
