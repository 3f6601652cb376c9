//! Routing: from free text to a single tool decision

mod model;
mod parse;

pub use model::{RoutingModel, Sampling};
pub use parse::{decision_from_value, parse_decision};
