use thiserror::Error;

/// Failure of a probe before a classifiable provider response existed.
///
/// The dispatcher turns any of these into a `500 / error` result.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{0}")]
    Transport(reqwest::Error),

    #[error("invalid JSON in provider response: {0}")]
    Body(#[from] serde_json::Error),
}

// Some providers take the key as a query parameter, so the URL must not
// leak into the error text.
impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        ProbeError::Transport(err.without_url())
    }
}
