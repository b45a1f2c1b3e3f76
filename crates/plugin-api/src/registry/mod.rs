mod registered_source;
mod source;
mod store;

pub use registered_source::RegisteredSource;
pub use source::Source;
pub use store::SourceRegistry;
