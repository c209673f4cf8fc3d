use thiserror::Error;

/// Why a fetch of the reading log produced no records.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no valid Google Sheets API key is configured")]
    MissingApiKey,
    #[error("the Google Sheets API key was rejected: {0}")]
    InvalidApiKey(String),
    #[error("Google Sheets API error ({status}): {message}")]
    Api { status: String, message: String },
    #[error("no rows found in the spreadsheet range")]
    NoData,
    #[error("request to Google Sheets failed: {0}")]
    Transport(String),
    #[error("failed to decode Google Sheets response: {0}")]
    Decode(String),
}

impl SourceError {
    pub fn api(status: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::Api {
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        SourceError::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        SourceError::Decode(message.into())
    }
}
