use crate::core::traits::Transport;
use crate::utils::error::{AppError, AppResult};
use crate::utils::output::OutputStyle;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("mame-dl/", env!("CARGO_PKG_VERSION"));

/// [`Transport`] backed by a reqwest client
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?,
        })
    }

    async fn get(&self, url: &str) -> AppResult<Response> {
        debug!(url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| AppError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch {
                url: url.to_string(),
                reason: format!("server answered {}", status),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_page(&self, url: &str) -> AppResult<String> {
        let response = self.get(url).await?;
        response.text().await.map_err(|e| AppError::Fetch {
            url: url.to_string(),
            reason: format!("failed to read body: {}", e),
        })
    }

    async fn download(&self, url: &str, dest: &Path, label: &str) -> AppResult<u64> {
        let mut response = self.get(url).await?;
        let bar = OutputStyle::download_bar(response.content_length(), label);
        let mut file = tokio::fs::File::create(dest).await?;
        let mut written: u64 = 0;

        loop {
            let chunk = match response.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    bar.abandon();
                    return Err(AppError::Fetch {
                        url: url.to_string(),
                        reason: format!("transfer interrupted: {}", e),
                    });
                }
            };
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            bar.inc(chunk.len() as u64);
        }

        file.flush().await?;
        bar.finish_and_clear();
        info!(url, bytes = written, dest = %dest.display(), "download complete");
        Ok(written)
    }
}
