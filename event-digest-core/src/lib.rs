#![doc = "event-digest-core: core logic library for event-digest."]

//! This crate contains the event pipeline: deciding where events come from,
//! loading them, grouping and filtering them, and rendering the HTML schedule
//! and the Markdown summary.
//!
//! Process-level concerns (argument parsing, environment, the concrete HTTP
//! client) live in the `event-digest` binary crate.

pub mod contract;
pub mod error;
pub mod load;
pub mod pipeline;
pub mod render;
pub mod resolve;
pub mod style;
pub mod transform;
