pub mod analytics;
pub mod errors;
pub mod formatting;
pub mod records;
pub mod source;

// Re-exports
pub use analytics::{aggregate, stats};
pub use errors::SourceError;
pub use source::RecordSource;
