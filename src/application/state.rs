use std::sync::Arc;

use crate::domain::source::RecordSource;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RecordSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }
}
