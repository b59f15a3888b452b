//! Network transfer capability and its libcurl implementation.

use std::time::Duration;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!(
    "jsbuild/",
    env!("CARGO_PKG_VERSION"),
    " (+https://www.gkbrk.com/project/jsbuild)"
);

/// Failure of a single GET.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Curl reported an error (DNS, connect, TLS, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

/// Performs a blocking HTTP GET and returns the raw body.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// libcurl-backed transport. Follows redirects, no retries.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    user_agent: String,
    connect_timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Http(code));
        }
        tracing::debug!(url, bytes = body.len(), "GET complete");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_names_client_and_version() {
        assert!(USER_AGENT.starts_with("jsbuild/"));
        assert!(USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn http_error_display() {
        assert_eq!(TransportError::Http(404).to_string(), "HTTP 404");
    }

    #[test]
    fn invalid_url_is_curl_error() {
        let err = CurlTransport::new().get("http://[::1").unwrap_err();
        assert!(matches!(err, TransportError::Curl(_)));
    }
}
