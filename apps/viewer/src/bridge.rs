//! Worker thread that owns the async runtime and feeds queued commands to
//! the controller.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::{ViewerCommand, ViewerController};
use crossbeam_channel::Receiver;
use tokio::task::JoinSet;

/// Runs the startup load, then drains `cmd_rx` until every sender is gone.
/// Each command's local part runs inline in queue order; only its network
/// part is spawned, so search, "breed all" and clear stay responsive.
pub fn launch(controller: Arc<ViewerController>, cmd_rx: Receiver<ViewerCommand>) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build viewer runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let mut loads = JoinSet::new();
            loads.spawn({
                let controller = controller.clone();
                async move { controller.start().await }
            });

            while let Ok(cmd) = cmd_rx.recv() {
                if let Some(pending) = controller.prepare(cmd).await {
                    tracing::debug!(load = pending.name(), "spawning viewer load");
                    let controller = controller.clone();
                    loads.spawn(async move { controller.complete(pending).await });
                }
            }

            while let Some(result) = loads.join_next().await {
                if let Err(err) = result {
                    tracing::warn!("viewer load task failed: {err}");
                }
            }
        });
    })
}

#[cfg(test)]
#[path = "tests/bridge_tests.rs"]
mod tests;
