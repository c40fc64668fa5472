use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("resource-retriever/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_MAX_REDIRECTS: usize = 10;

pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Configuration applied to the transfer handle when a retriever is built.
///
/// # Examples
///
/// ```
/// use resource_retriever::RetrieverOptions;
/// use std::time::Duration;
///
/// let options = RetrieverOptions::default()
///     .connect_timeout(Duration::from_secs(5))
///     .header("Accept", "application/octet-stream");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RetrieverOptions {
    /// Connection establishment timeout. `None` keeps the runtime default.
    pub connect_timeout: Option<Duration>,

    /// Whole-request timeout. `None` disables it.
    pub timeout: Option<Duration>,

    pub user_agent: String,

    /// Redirects followed before a transfer fails.
    ///
    /// Default: 10
    pub max_redirects: usize,

    /// Read size per body chunk; one progress update is emitted per chunk.
    ///
    /// Default: 16 KiB
    pub chunk_size: usize,

    /// Extra headers sent with every network request.
    pub headers: Arc<[(String, String)]>,
}

impl fmt::Debug for RetrieverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrieverOptions")
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("max_redirects", &self.max_redirects)
            .field("chunk_size", &self.chunk_size)
            .field("headers", &self.headers.len())
            .finish()
    }
}

impl Default for RetrieverOptions {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            timeout:         None,
            user_agent:      DEFAULT_USER_AGENT.to_string(),
            max_redirects:   DEFAULT_MAX_REDIRECTS,
            chunk_size:      DEFAULT_CHUNK_SIZE,
            headers:         Arc::new([]),
        }
    }
}

impl RetrieverOptions {
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Set the chunk size. Zero is raised to one byte.
    #[must_use]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers: Vec<_> = self.headers.iter().cloned().collect();
        headers.push((key.into(), value.into()));
        self.headers = Arc::from(headers);
        self
    }

    /// Replace all extra headers.
    #[must_use]
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = Arc::from(headers);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RetrieverOptions::default();
        assert_eq!(options.connect_timeout, None);
        assert_eq!(options.timeout, None);
        assert_eq!(options.max_redirects, 10);
        assert_eq!(options.chunk_size, 16 * 1024);
        assert!(options.user_agent.starts_with("resource-retriever/"));
        assert!(options.headers.is_empty());
    }

    #[test]
    fn test_builder() {
        let options = RetrieverOptions::default()
            .connect_timeout(Duration::from_secs(2))
            .timeout(Duration::from_secs(30))
            .user_agent("viewer/1.0")
            .max_redirects(0)
            .chunk_size(0)
            .header("Accept", "*/*")
            .header("X-Trace", "1");

        assert_eq!(options.connect_timeout, Some(Duration::from_secs(2)));
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
        assert_eq!(options.user_agent, "viewer/1.0");
        assert_eq!(options.max_redirects, 0);
        assert_eq!(options.chunk_size, 1);
        assert_eq!(options.headers.len(), 2);
        assert_eq!(options.headers[1], ("X-Trace".to_string(), "1".to_string()));
    }

    #[test]
    fn test_headers_replace() {
        let options = RetrieverOptions::default()
            .header("A", "1")
            .headers(vec![("B".to_string(), "2".to_string())]);
        assert_eq!(&*options.headers, &[("B".to_string(), "2".to_string())]);
    }
}
