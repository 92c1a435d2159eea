use std::time::Duration;

use super::{AbstractSource, SourceFuture};
use crate::LookupError;

/// JMM 2026 meeting API.
pub const DEFAULT_BASE_URL: &str = "https://meetings.ams.org/math/jmm2026/meetingapi.cgi";

/// HTTP client for the AMS meeting API (`GET {base}/Paper/{key}`).
pub struct MeetingApi {
    base_url: String,
    client: reqwest::Client,
}

impl MeetingApi {
    /// Build a client for `base_url`. Requests have no timeout unless one is
    /// given.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, LookupError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("abstractor/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(base_url, builder.build()?))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn paper_url(&self, key: &str) -> String {
        format!(
            "{}/Paper/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(key)
        )
    }
}

impl AbstractSource for MeetingApi {
    fn name(&self) -> &str {
        "AMS meeting API"
    }

    fn fetch<'a>(&'a self, key: &'a str) -> SourceFuture<'a> {
        Box::pin(async move {
            let url = self.paper_url(key);
            tracing::debug!(key, url = %url, "fetching paper record");

            let resp = self.client.get(&url).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(LookupError::Status {
                    status: status.as_u16(),
                });
            }

            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_url_appends_key() {
        let api = MeetingApi::with_client(DEFAULT_BASE_URL, reqwest::Client::new());
        assert_eq!(
            api.paper_url("1001"),
            "https://meetings.ams.org/math/jmm2026/meetingapi.cgi/Paper/1001"
        );
    }

    #[test]
    fn client_builds_with_and_without_timeout() {
        assert!(MeetingApi::new(DEFAULT_BASE_URL, None).is_ok());
        assert!(MeetingApi::new(DEFAULT_BASE_URL, Some(Duration::from_secs(5))).is_ok());
    }

    #[test]
    fn paper_url_tolerates_trailing_slash_and_escapes_key() {
        let api = MeetingApi::with_client("http://localhost:8080/api/", reqwest::Client::new());
        assert_eq!(
            api.paper_url("12/../34"),
            "http://localhost:8080/api/Paper/12%2F..%2F34"
        );
    }
}
