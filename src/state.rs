use crate::reconcile::ReconcileContext;

/// Selection/download state for the panel.
///
/// Only one download runs at a time; while one is in flight every trigger is
/// gated off until the reset signal from the job poller arrives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DownloadState {
    #[default]
    Idle,
    /// A language has been picked from the dropdown.
    Selected(String),
    /// An install job is running for this code.
    Downloading(String),
}

/// Outcome of a requested state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Accepted,
    /// The request was ignored; the state did not change.
    Rejected,
}

impl DownloadState {
    /// Record a dropdown selection.
    ///
    /// Accepted from `Idle` or `Selected` when the code exists on the
    /// installable list. Unknown codes and selections made while a download
    /// is in flight leave the state unchanged.
    pub fn select(&mut self, code: &str, ctx: &ReconcileContext) -> Transition {
        if matches!(self, DownloadState::Downloading(_)) {
            return Transition::Rejected;
        }
        if ctx.find_installable(code).is_none() {
            return Transition::Rejected;
        }
        *self = DownloadState::Selected(code.to_string());
        Transition::Accepted
    }

    /// Move to `Downloading`, returning the code to install.
    ///
    /// Rejected from `Idle` (nothing selected) and from `Downloading`
    /// (a second download attempt is a no-op).
    pub fn start_download(&mut self) -> Option<String> {
        match self {
            DownloadState::Selected(code) => {
                let code = code.clone();
                *self = DownloadState::Downloading(code.clone());
                Some(code)
            }
            _ => None,
        }
    }

    /// Reset signal from the poller: the job finished. Back to `Idle`.
    pub fn finish(&mut self) {
        *self = DownloadState::Idle;
    }

    /// Whether the download trigger should be enabled right now: not
    /// downloading, and the current selection still matches a catalog entry.
    pub fn can_download(&self, ctx: &ReconcileContext) -> bool {
        match self {
            DownloadState::Selected(code) => ctx.find_installable(code).is_some(),
            _ => false,
        }
    }

    pub fn is_downloading(&self) -> bool {
        matches!(self, DownloadState::Downloading(_))
    }
}
