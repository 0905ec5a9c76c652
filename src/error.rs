use ::scraper::error::SelectorErrorKind;
use plotters::drawing::DrawingAreaErrorKind;

/// All errors that can occur while scraping, persisting or analyzing hackathons.
#[derive(thiserror::Error, Debug)]
pub enum HackathonError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A chart could not be drawn or written.
    #[error("chart rendering failed: {0}")]
    Chart(String),
}

impl<'a> From<SelectorErrorKind<'a>> for HackathonError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        HackathonError::Selector(err.to_string())
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for HackathonError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        HackathonError::Chart(err.to_string())
    }
}

impl HackathonError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        HackathonError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HackathonError>;
