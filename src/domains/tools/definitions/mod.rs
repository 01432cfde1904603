//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file together with its response formatter.

pub mod common;
pub mod health;
pub mod preview;
pub mod rules;
pub mod search;

pub use health::{HealthCheckParams, HealthCheckTool};
pub use preview::{NormalizationPreviewParams, NormalizationPreviewTool};
pub use rules::{NormalizationRulesParams, NormalizationRulesTool};
pub use search::{SearchParams, SearchTool};
