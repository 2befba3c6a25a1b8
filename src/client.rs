use crate::catalog::LanguageEntry;
use crate::config::Config;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Why a catalog fetch failed. The caller's only recovery is resetting the
/// affected list to empty, but the taxonomy keeps the logs useful.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode language list: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Progress snapshot for a server-side job, as reported by the local
/// server's update endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct JobProgress {
    pub job_name: String,
    /// True once the job has finished (or been cleared) server-side.
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub percent: f64,
}

#[derive(Debug, Serialize)]
struct LangRequest<'a> {
    lang: &'a str,
}

/// HTTP client for both remote collaborators: the central catalog server
/// (installable list) and the local content server (installed list, commands,
/// job progress, online check).
#[derive(Debug, Clone)]
pub struct PackServerClient {
    http: reqwest::Client,
    central_url: String,
    local_url: String,
}

impl PackServerClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            central_url: config.central_server_url.trim_end_matches('/').to_string(),
            local_url: config.local_server_url.trim_end_matches('/').to_string(),
        })
    }

    /// Languages installable from the central catalog.
    pub async fn fetch_installable_languages(&self) -> Result<Vec<LanguageEntry>, FetchError> {
        let url = format!("{}/languagepacks/available", self.central_url);
        let languages = self.fetch_language_list(&url).await?;
        info!("Fetched {} installable languages from catalog", languages.len());
        Ok(languages)
    }

    /// Languages already installed on the local server.
    pub async fn fetch_installed_languages(&self) -> Result<Vec<LanguageEntry>, FetchError> {
        let url = format!("{}/languagepacks/installed", self.local_url);
        let languages = self.fetch_language_list(&url).await?;
        info!("Fetched {} installed languages from local server", languages.len());
        Ok(languages)
    }

    async fn fetch_language_list(&self, url: &str) -> Result<Vec<LanguageEntry>, FetchError> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        response.json().await.map_err(FetchError::Decode)
    }

    /// Ask the local server to start a language pack download job. The
    /// response only acknowledges the job; completion is observed by polling
    /// [`job_status`](Self::job_status).
    pub async fn request_install(&self, code: &str) -> Result<()> {
        let url = format!("{}/languagepacks/start-download", self.local_url);
        self.post_lang_command(&url, code)
            .await
            .with_context(|| format!("Failed to start download of language pack '{}'", code))
    }

    /// Delete an installed language pack (or, for English, its subtitles).
    pub async fn request_delete(&self, code: &str) -> Result<()> {
        let url = format!("{}/languagepacks/delete", self.local_url);
        self.post_lang_command(&url, code)
            .await
            .with_context(|| format!("Failed to delete language pack '{}'", code))
    }

    /// Make a language the server default. On success the caller is expected
    /// to rebuild its whole view of the world.
    pub async fn request_set_default(&self, code: &str) -> Result<()> {
        let url = format!("{}/languagepacks/set-default", self.local_url);
        self.post_lang_command(&url, code)
            .await
            .with_context(|| format!("Failed to set default language to '{}'", code))
    }

    async fn post_lang_command(&self, url: &str, code: &str) -> Result<()> {
        debug!("POST {} lang={}", url, code);
        let response = self
            .http
            .post(url)
            .json(&LangRequest { lang: code })
            .send()
            .await
            .context("Failed to send request to local server")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Local server error ({}): {}", status, body);
        }

        Ok(())
    }

    /// Whether the local server can reach the internet. Any probe failure
    /// counts as offline: the online check returns much faster than the
    /// offline one, so offline is the safe assumption.
    pub async fn check_server_online(&self) -> bool {
        let url = format!("{}/status/online", self.local_url);
        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => response
                .json::<OnlineStatus>()
                .await
                .map(|s| s.online)
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Progress of a named server-side job.
    pub async fn job_status(&self, job_name: &str) -> Result<JobProgress> {
        let url = format!("{}/updates/progress", self.local_url);
        let response = self
            .http
            .get(&url)
            .query(&[("job", job_name)])
            .send()
            .await
            .context("Failed to query job progress")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Progress endpoint error ({}): {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse job progress")
    }
}

#[derive(Debug, Deserialize)]
struct OnlineStatus {
    #[serde(default)]
    online: bool,
}
