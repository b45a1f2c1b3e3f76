//! Core crate exports for the `blink` launcher engine.
//!
//! The root module re-exports the result aggregation and dispatch types so
//! that embedders can drive the engine without digging through the module
//! hierarchy. Source plugins live in their own crates and talk to the engine
//! through `blink_plugin_api`.

pub mod app_dirs;
pub mod dispatch;
pub mod results;

pub use dispatch::QueryDispatcher;
pub use results::{
	ListConfig, ListPatch, PatchOp, ROW_HEIGHT, ResultsList, ResultsSnapshot, TOP_MARGIN,
};

pub use blink_plugin_api as plugin_api;
