use async_trait::async_trait;

use super::SourceError;
use crate::domain::records::RawRecord;

/// Anything that can produce the full reading log in row order.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawRecord>, SourceError>;
}
