use std::sync::Arc;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use crate::data::{HandleId, RetrieverOptions};
use crate::error::{FetchError, describe};

/// A reusable network session.
///
/// Wraps one blocking HTTP client whose connection pool is kept for the
/// handle's whole life, so repeated transfers to the same host reuse open
/// connections. The handle is move-only; the pool is released when it drops.
pub struct TransferHandle {
    id:         HandleId,
    client:     Client,
    headers:    Arc<[(String, String)]>,
    chunk_size: usize,
    transfers:  u64,
}

impl TransferHandle {
    pub fn open(options: &RetrieverOptions) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .user_agent(options.user_agent.clone())
            .redirect(Policy::limited(options.max_redirects))
            .timeout(options.timeout);
        if let Some(timeout) = options.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Handle(describe(&e)))?;

        let id = HandleId::next();
        tracing::debug!(handle = %id, "opened transfer handle");
        Ok(Self {
            id,
            client,
            headers: Arc::clone(&options.headers),
            chunk_size: options.chunk_size.max(1),
            transfers: 0,
        })
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Number of network transfers started on this handle.
    pub fn transfers(&self) -> u64 {
        self.transfers
    }

    pub(crate) fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Build a GET request for `url`, counting it as a new transfer.
    pub(crate) fn begin(&mut self, url: &str) -> reqwest::blocking::RequestBuilder {
        self.transfers += 1;
        let mut request = self.client.get(url);
        for (key, value) in self.headers.iter() {
            request = request.header(key.as_str(), value.as_str());
        }
        request
    }
}

impl std::fmt::Debug for TransferHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferHandle")
            .field("id", &self.id)
            .field("transfers", &self.transfers)
            .finish_non_exhaustive()
    }
}

impl Drop for TransferHandle {
    fn drop(&mut self) {
        tracing::debug!(handle = %self.id, transfers = self.transfers, "closing transfer handle");
    }
}
