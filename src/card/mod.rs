//! Card module.
//!
//! Reshapes Uptime Kuma notifications into Google Chat cardsV2 messages.

mod models;
mod transform;

pub use models::*;
pub use transform::*;
