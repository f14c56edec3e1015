//! Periodic refresh loop with cooperative shutdown.

use crate::state::{RefreshOutcome, SyncState};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Refresh pools every `period` until `shutdown` resolves.
///
/// After each successful or failed refresh `on_tick` runs (the binary fetches
/// prices there). `shutdown` is polled for the whole lifetime of the loop, so a
/// signal arriving mid-refresh is never missed: the state is disposed at once
/// and the in-flight refresh is awaited so that it ends as
/// [`RefreshOutcome::Disposed`] without writing.
pub async fn run_until<T, Fut, S>(state: &SyncState, period: Duration, mut on_tick: T, shutdown: S)
where
    T: FnMut() -> Fut,
    Fut: Future<Output = ()>,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down");
                state.dispose();
                return;
            }
            _ = ticker.tick() => {}
        }

        let work = async {
            let outcome = state.pools.refresh().await;
            match &outcome {
                RefreshOutcome::Updated { upserted } => {
                    info!("{} pools upserted, {} known", upserted, state.pools.len());
                }
                RefreshOutcome::Unchanged(e) => {
                    warn!("Serving {} stale pools: {}", state.pools.len(), e);
                }
                RefreshOutcome::Disposed => return RefreshOutcome::Disposed,
            }
            on_tick().await;
            outcome
        };
        tokio::pin!(work);

        tokio::select! {
            outcome = &mut work => {
                if outcome == RefreshOutcome::Disposed {
                    return;
                }
            }
            _ = &mut shutdown => {
                info!("Shutting down");
                state.dispose();
                let outcome = (&mut work).await;
                info!("In-flight tick finished after shutdown: {:?}", outcome);
                return;
            }
        }
    }
}
