// src/engine/runtime.rs

use std::future::Future;

use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::engine::HEARTBEAT_CHECK_INTERVAL;
use crate::exec::ServerProcessHandle;
use crate::types::ConnectionStatus;

/// Drive a launched server until its output ends or `shutdown` resolves.
///
/// - Output events are dispatched to the handle's listeners and fed to its
///   connection monitor.
/// - Every [`HEARTBEAT_CHECK_INTERVAL`] the heartbeat timeout is checked.
///
/// Either way the handle is stopped before returning, so the final status is
/// always `disconnected`.
pub async fn supervise<S>(handle: &mut ServerProcessHandle, shutdown: S) -> ConnectionStatus
where
    S: Future<Output = ()>,
{
    info!(server = %handle.identity(), "supervising server output");

    let mut ticker = interval(HEARTBEAT_CHECK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!(server = %handle.identity(), "shutdown requested");
                break;
            }
            event = handle.dispatch_next() => {
                if event.is_none() {
                    info!(server = %handle.identity(), "server output closed");
                    break;
                }
            }
            _ = ticker.tick() => {
                debug!(server = %handle.identity(), "heartbeat check");
                handle.check_heartbeat(Instant::now());
            }
        }
    }

    handle.stop();
    handle.status()
}
