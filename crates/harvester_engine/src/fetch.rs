use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use url::Url;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Applied to every request that does not carry its own timeout.
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    /// Empty means any content type is accepted.
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            redirect_limit: 5,
            max_bytes: 32 * 1024 * 1024,
            allowed_content_types: vec![
                "application/vnd.ogc.wms_xml".to_string(),
                "application/vnd.ogc.se_xml".to_string(),
                "application/xml".to_string(),
                "text/xml".to_string(),
            ],
        }
    }
}

/// HTTP session owned by one worker: a single pooled client with default
/// headers, reused for every request the worker makes. Requests on one
/// session are expected to be serialized by the caller.
#[derive(Debug)]
pub struct HttpSession {
    client: reqwest::Client,
    settings: FetchSettings,
    redirect_counter: Arc<AtomicUsize>,
}

impl HttpSession {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = build_client(&settings, redirect_counter.clone())?;
        Ok(Self {
            client,
            settings,
            redirect_counter,
        })
    }

    /// GET `url` with `query` merged over its existing query string and
    /// return the full body.
    pub async fn get(&self, url: &Url, query: &[(&str, &str)]) -> Result<FetchOutput, FetchError> {
        let target = merge_query(url, query);
        self.redirect_counter.store(0, Ordering::Relaxed);

        let response = self
            .client
            .get(target.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let metadata = FetchMetadata {
            requested_url: target.to_string(),
            final_url,
            redirect_count: self.redirect_counter.load(Ordering::Relaxed),
            content_type,
            byte_len: bytes.len() as u64,
        };

        Ok(FetchOutput { bytes, metadata })
    }

    /// Lightweight reachability probe: succeeds only on a 2xx status.
    /// The body is never read.
    pub async fn probe(&self, url: &Url, timeout: Duration) -> Result<(), FetchError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ))
        }
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        if self.settings.allowed_content_types.is_empty() {
            return true;
        }
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }
}

fn build_client(
    settings: &FetchSettings,
    redirect_counter: Arc<AtomicUsize>,
) -> Result<reqwest::Client, FetchError> {
    let redirect_limit = settings.redirect_limit;
    let policy = reqwest::redirect::Policy::custom(move |attempt| {
        let count = attempt.previous().len();
        redirect_counter.store(count, Ordering::Relaxed);
        if count >= redirect_limit {
            attempt.error("redirect limit exceeded")
        } else {
            attempt.follow()
        }
    });

    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.ogc.wms_xml, application/xml, text/xml;q=0.9"),
    );
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("harvester_engine/", env!("CARGO_PKG_VERSION"))),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .redirect(policy)
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

/// Returns a copy of `url` whose query has every `params` key (compared
/// case-insensitively) replaced by the given value. The input is not mutated.
pub fn merge_query(url: &Url, params: &[(&str, &str)]) -> Url {
    let mut merged = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !params.iter().any(|(p, _)| p.eq_ignore_ascii_case(key)))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    {
        let mut pairs = merged.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }
    if merged.query() == Some("") {
        merged.set_query(None);
    }
    merged
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
