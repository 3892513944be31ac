use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing or invalid input: {0}")]
    Input(String),

    #[error("Access denied by the YouTube API: {0}")]
    Access(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("YouTube API error: {0}")]
    YouTubeApi(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Bucket shown to the user in front of the message.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Input(_) | Error::Config(_) => "InputError",
            Error::Access(_) => "AccessError",
            Error::NotFound(_) => "NotFoundError",
            _ => "Error",
        }
    }
}
