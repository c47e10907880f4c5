use quiz_core::QuestionBank;

use crate::error::LoadError;

/// Fetches the question bank once at startup.
///
/// One GET, no retries: the consumer shows a permanent failure message
/// and leaves recovery to a manual restart.
#[derive(Clone)]
pub struct QuestionLoader {
    client: reqwest::Client,
    url: String,
}

impl QuestionLoader {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the question bank.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Request` when the request itself fails,
    /// `LoadError::Status` (carrying the raw body) on a non-success
    /// status, and `LoadError::Parse` (also carrying the raw body) when
    /// the response is not a valid question bank.
    pub async fn load(&self) -> Result<QuestionBank, LoadError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LoadError::Status { status, body });
        }

        parse_bank(&body)
    }
}

/// Parse a response body as the question bank wire shape.
///
/// # Errors
///
/// Returns `LoadError::Parse` carrying the raw body on any mismatch.
pub fn parse_bank(body: &str) -> Result<QuestionBank, LoadError> {
    serde_json::from_str(body).map_err(|err| LoadError::Parse {
        detail: err.to_string(),
        body: body.to_owned(),
    })
}
