use crate::client::PackServerClient;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Watch a server-side job until it completes, then fire the reset callback.
///
/// Spawns a task that polls the local server's progress endpoint on a fixed
/// interval. Polling errors are logged and polling continues; the task stops
/// after the callback has run. The returned handle is the subscription: drop
/// it to keep watching in the background, or abort it to stop early.
pub fn watch_job<F, Fut>(
    client: PackServerClient,
    job_name: impl Into<String>,
    interval: Duration,
    on_reset: F,
) -> JoinHandle<()>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let job_name = job_name.into();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // A missed tick should not cause a polling burst.
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match client.job_status(&job_name).await {
                Ok(progress) if progress.completed => {
                    debug!("Job '{}' completed", job_name);
                    on_reset().await;
                    return;
                }
                Ok(progress) => {
                    debug!("Job '{}' at {:.1}%", job_name, progress.percent);
                }
                Err(e) => {
                    warn!("Failed to poll job '{}': {}", job_name, e);
                }
            }
        }
    })
}
