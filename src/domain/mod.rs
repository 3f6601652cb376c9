//! Domain types for the router
//!
//! - RoutingDecision: the model's choice of one tool call (or none)
//! - ResponseEnvelope: the uniform per-request result

pub mod decision;
pub mod envelope;

pub use decision::{NO_TOOL, RoutingDecision};
pub use envelope::{NO_ACTION_MESSAGE, ResponseEnvelope};
