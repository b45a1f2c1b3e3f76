pub mod context;
pub mod error;
pub mod registry;
pub mod search;
pub mod types;

pub use context::QueryContext;
pub use error::RegistryError;
pub use registry::{RegisteredSource, Source, SourceRegistry};
pub use search::{
    BatchEnvelope, BatchStream, MATCH_CHUNK_SIZE, MAX_SOURCE_RESULTS, PREFILTER_ENABLE_THRESHOLD,
    ScoreCollector, options_for_query,
};
pub use types::{Candidate, SourceDescriptor, SourceKey};
