//! Configuration loading and resolution.
//!
//! `load` is the entry point: it layers default configuration files,
//! `BLINK__`-prefixed environment variables and CLI overrides, then validates
//! the combined result into a [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub(crate) use loader::load;
pub(crate) use resolved::ResolvedConfig;
