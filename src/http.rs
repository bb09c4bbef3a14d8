use crate::error::FetchError;
use bytes::Bytes;
use reqwest::StatusCode;

const USER_AGENT: &str = concat!("copr2url/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper around a shared reqwest client.
///
/// One GET, one body. No retries and no timeouts beyond the client's defaults,
/// a failed request just means the current repo entry gets skipped.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetches `url` and returns the whole body.
    /// Anything other than a 200 counts as a failure, even other 2xx codes.
    pub async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        self.fetch_query(url, &[]).await
    }

    /// Same as [`fetch`](Self::fetch), with `query` appended as encoded
    /// query parameters.
    pub async fn fetch_query(&self, url: &str, query: &[(&str, &str)]) -> Result<Bytes, FetchError> {
        log::debug!("GET {} {:?}", url, query);

        let mut request = self.client.get(url).header("User-Agent", USER_AGENT);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                code: status.as_u16(),
            });
        }

        response.bytes().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
