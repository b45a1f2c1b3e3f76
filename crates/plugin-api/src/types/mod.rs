mod candidate;
mod source;

pub use candidate::Candidate;
pub use source::{SourceDescriptor, SourceKey};
