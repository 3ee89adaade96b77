use thiserror::Error;

pub const FALLBACK_FEEDBACK: &str = "Great effort! Keep practicing to improve your muscle memory.";

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback request failed: {0}")]
    Request(String),
    #[error("feedback service returned status {0}")]
    Status(u16),
    #[error("feedback service returned an empty message")]
    Empty,
}

/// Short coaching line for a finished attempt. Sources are queried off the
/// input thread, so they must be shareable across threads.
pub trait FeedbackSource: Send + Sync {
    fn get_feedback(&self, wpm: u32, accuracy: u32) -> Result<String, FeedbackError>;
}

pub struct StaticFeedback;

impl FeedbackSource for StaticFeedback {
    fn get_feedback(&self, _wpm: u32, _accuracy: u32) -> Result<String, FeedbackError> {
        Ok(FALLBACK_FEEDBACK.to_string())
    }
}

/// Plain-text coaching line from `GET {url}?wpm=..&accuracy=..`.
#[cfg(feature = "network")]
pub struct HttpFeedback {
    url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "network")]
impl HttpFeedback {
    pub fn new(url: &str) -> Result<Self, FeedbackError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| FeedbackError::Request(e.to_string()))?;
        Ok(Self {
            url: url.trim_end_matches('?').to_string(),
            client,
        })
    }

    fn request_url(&self, wpm: u32, accuracy: u32) -> String {
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{sep}wpm={wpm}&accuracy={accuracy}", self.url)
    }
}

#[cfg(feature = "network")]
impl FeedbackSource for HttpFeedback {
    fn get_feedback(&self, wpm: u32, accuracy: u32) -> Result<String, FeedbackError> {
        let response = self
            .client
            .get(self.request_url(wpm, accuracy))
            .send()
            .map_err(|e| FeedbackError::Request(e.to_string()))?;
        if !response.status().is_success() {
            return Err(FeedbackError::Status(response.status().as_u16()));
        }
        let text = response
            .text()
            .map_err(|e| FeedbackError::Request(e.to_string()))?;
        let text = text.trim();
        if text.is_empty() {
            return Err(FeedbackError::Empty);
        }
        Ok(text.to_string())
    }
}

/// Feedback from `source`, or the fallback line when it fails.
pub fn feedback_or_fallback(source: &dyn FeedbackSource, wpm: u32, accuracy: u32) -> String {
    match source.get_feedback(wpm, accuracy) {
        Ok(line) => line,
        Err(e) => {
            log::warn!("feedback unavailable: {e}");
            FALLBACK_FEEDBACK.to_string()
        }
    }
}
