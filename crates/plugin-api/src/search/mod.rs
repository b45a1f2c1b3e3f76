mod collector;
mod options;
mod stream;

pub use collector::ScoreCollector;
pub use options::options_for_query;
pub use stream::{BatchEnvelope, BatchStream};

pub const PREFILTER_ENABLE_THRESHOLD: usize = 1_000;
pub const MAX_SOURCE_RESULTS: usize = 128;
pub const MATCH_CHUNK_SIZE: usize = 512;
