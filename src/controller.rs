use crate::client::PackServerClient;
use crate::config::Config;
use crate::poller::watch_job;
use crate::reconcile::{InstallableOption, InstalledRow, ReconcileContext, SelectionDetails};
use crate::state::{DownloadState, Transition};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{info, warn};

/// Server-side job name for language pack downloads.
pub const DOWNLOAD_JOB: &str = "languagepackdownload";

/// Message shown when the local server has no route to the catalog.
pub const OFFLINE_MESSAGE: &str =
    "The server does not have internet access; language packs cannot be downloaded at this time.";

/// Everything the rendering layer needs for one paint of the panel.
#[derive(Debug, Clone)]
pub struct PanelView {
    pub rows: Vec<InstalledRow>,
    pub options: Vec<InstallableOption>,
    /// Details pane for the current dropdown selection, if any.
    pub details: Option<SelectionDetails>,
    pub can_download: bool,
    pub downloading: bool,
    pub refreshed_at: DateTime<Utc>,
}

/// Result of the connectivity probe that gates install actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerStatus {
    Online,
    /// Carries the user-visible message; install actions stay disabled.
    Offline(&'static str),
}

/// Owns the reconcile context and download state, and drives the remote
/// collaborators. All mutation happens through `&mut self` on a single task,
/// so the two lists and the download flag can never be observed torn.
pub struct PanelController {
    client: PackServerClient,
    ctx: ReconcileContext,
    state: DownloadState,
    poll_interval: Duration,
    refreshed_at: DateTime<Utc>,
}

impl PanelController {
    pub fn new(config: &Config, client: PackServerClient) -> Self {
        Self {
            client,
            ctx: ReconcileContext::new(&config.default_language, config.show_beta),
            state: DownloadState::default(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            refreshed_at: Utc::now(),
        }
    }

    /// Fetch both lists concurrently and reconcile.
    ///
    /// The fetches have no ordering guarantee between them; reconciliation
    /// always recomputes from the two full lists after both have landed, so
    /// arrival order cannot change the output. A failed fetch resets its list
    /// to empty rather than leaving stale data.
    pub async fn refresh(&mut self) -> PanelView {
        let (installable, installed) = futures::join!(
            self.client.fetch_installable_languages(),
            self.client.fetch_installed_languages(),
        );

        self.ctx.installable = match installable {
            Ok(languages) => languages,
            Err(e) => {
                warn!("Installable language fetch failed, clearing list: {}", e);
                Vec::new()
            }
        };
        self.ctx.installed = match installed {
            Ok(languages) => languages,
            Err(e) => {
                warn!("Installed language fetch failed, clearing list: {}", e);
                Vec::new()
            }
        };
        self.refreshed_at = Utc::now();

        self.view()
    }

    /// Re-fetch only the installed list (the post-download reset path) and
    /// reconcile against the catalog list already in hand.
    pub async fn refresh_installed(&mut self) -> PanelView {
        self.ctx.installed = match self.client.fetch_installed_languages().await {
            Ok(languages) => languages,
            Err(e) => {
                warn!("Installed language fetch failed, clearing list: {}", e);
                Vec::new()
            }
        };
        self.refreshed_at = Utc::now();

        self.view()
    }

    /// Reconcile the current lists into render records. Pure with respect to
    /// remote state; cheap enough to run on every event.
    pub fn view(&self) -> PanelView {
        let details = match &self.state {
            DownloadState::Selected(code) | DownloadState::Downloading(code) => {
                self.ctx.selection_details(code)
            }
            DownloadState::Idle => None,
        };

        PanelView {
            rows: self.ctx.installed_rows(),
            options: self.ctx.installable_options(),
            details,
            can_download: self.state.can_download(&self.ctx),
            downloading: self.state.is_downloading(),
            refreshed_at: self.refreshed_at,
        }
    }

    /// Record a dropdown selection.
    pub fn select(&mut self, code: &str) -> Transition {
        self.state.select(code, &self.ctx)
    }

    /// Start the install job for the selected language.
    ///
    /// Returns `Ok(None)` when the state machine rejects the attempt (nothing
    /// selected, or a download already in flight). A failed server request
    /// propagates the error and leaves the state unchanged, so the trigger
    /// stays enabled.
    pub async fn start_download(&mut self) -> Result<Option<String>> {
        if !self.state.can_download(&self.ctx) {
            return Ok(None);
        }

        let code = match &self.state {
            DownloadState::Selected(code) => code.clone(),
            _ => return Ok(None),
        };

        self.client.request_install(&code).await?;
        self.state.start_download();
        info!("Started download of language pack '{}'", code);
        Ok(Some(code))
    }

    /// Block until the running download job resets server-side, then refresh
    /// the installed list. No-op view when nothing is downloading.
    pub async fn await_download_reset(&mut self) -> PanelView {
        if !self.state.is_downloading() {
            return self.view();
        }

        let (tx, rx) = tokio::sync::oneshot::channel();
        let subscription = watch_job(
            self.client.clone(),
            DOWNLOAD_JOB,
            self.poll_interval,
            move || async move {
                let _ = tx.send(());
            },
        );

        // The watcher task only ends by firing the callback or being aborted.
        if rx.await.is_err() {
            subscription.abort();
        }

        self.state.finish();
        self.refresh_installed().await
    }

    /// Delete a language pack, then refresh the installed list.
    pub async fn delete_language(&mut self, code: &str) -> Result<PanelView> {
        self.client.request_delete(code).await?;
        info!("Deleted language pack '{}'", code);
        Ok(self.refresh_installed().await)
    }

    /// Make a language the server default, then rebuild the whole view of the
    /// world (both lists), mirroring the full reload the server expects.
    pub async fn set_default(&mut self, code: &str) -> Result<PanelView> {
        self.client.request_set_default(code).await?;
        info!("Default language set to '{}'", code);
        self.ctx.default_language = code.to_string();
        Ok(self.refresh().await)
    }

    /// Connectivity probe gating install actions.
    pub async fn server_status(&self) -> ServerStatus {
        if self.client.check_server_online().await {
            ServerStatus::Online
        } else {
            ServerStatus::Offline(OFFLINE_MESSAGE)
        }
    }

    pub fn state(&self) -> &DownloadState {
        &self.state
    }
}
