use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use yansi::Paint;

use super::products::parse_catalog_payload;
use crate::error::SourceError;
use crate::models::Product;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        eprintln!("{}", msg);
    }
}

/// Anything that can hand over the full product catalog.
pub trait CatalogSource: Send + Sync {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>, SourceError>> + Send;
}

/// Catalog source backed by a single HTTP GET endpoint.
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
    retries: u32,
    backoff: Duration,
}

impl HttpCatalogSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("Bikolpo/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
            timeout,
            retries: 0,
            backoff: Duration::from_millis(500),
        })
    }

    /// Retry transient failures up to `retries` extra times, doubling the
    /// pause after each attempt.
    pub fn with_retries(mut self, retries: u32, backoff: Duration) -> Self {
        self.retries = retries;
        self.backoff = backoff;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_once(&self) -> Result<Vec<Product>, SourceError> {
        let parts = [
            Paint::new("curl").fg(yansi::Color::Green).bold().to_string(),
            format!("-X {}", Paint::new("GET").fg(yansi::Color::Yellow).bold()),
            format!("'{}'", Paint::new(&self.url).fg(yansi::Color::Cyan)),
        ];
        log_output(format!("Request:\n{}", parts.join(" ")));

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout.as_secs())
            } else {
                SourceError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            log_output(format!("Response:\n{}", Paint::new(format!("HTTP {}", status)).fg(yansi::Color::Red)));
            return Err(SourceError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout.as_secs())
            } else {
                SourceError::Network(e.to_string())
            }
        })?;
        let products = parse_catalog_payload(&text)?;
        log_output(format!(
            "Response:\n{}",
            Paint::new(format!("HTTP {} ({} products)", status, products.len())).rgb(100, 100, 100)
        ));
        Ok(products)
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        let mut delay = self.backoff;
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(products) => return Ok(products),
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    tracing::warn!(%e, attempt, retries = self.retries, "Catalog fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!(%e, url = %self.url, "Catalog fetch failed");
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_creation() {
        let source = HttpCatalogSource::new("http://localhost:9/products/", Duration::from_secs(1))
            .unwrap()
            .with_retries(3, Duration::from_millis(10));
        assert_eq!(source.url(), "http://localhost:9/products/");
        assert_eq!(source.retries, 3);
    }
}
