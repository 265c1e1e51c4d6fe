use futures::future::join_all;
use std::sync::Arc;

use crate::handle::AgentHandle;

/// Close every agent handle concurrently so one disconnected participant
/// cannot keep the others from completing. Each close runs as its own task:
/// a graceful close first, then a plain close if that fails. Failures are
/// logged and swallowed; this never raises.
pub async fn shutdown_all(handles: Vec<(String, Arc<dyn AgentHandle>)>) {
    let tasks: Vec<_> = handles
        .into_iter()
        .map(|(label, handle)| {
            tokio::spawn(async move {
                if let Err(first) = handle.close(true).await {
                    log::warn!("graceful close failed for {}: {}", label, first);
                    if let Err(err) = handle.close(false).await {
                        log::warn!("close failed for {}: {}", label, err);
                    }
                }
            })
        })
        .collect();

    for result in join_all(tasks).await {
        if let Err(err) = result {
            log::error!("shutdown task panicked: {}", err);
        }
    }
}
