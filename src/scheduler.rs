use crate::platform::BridgePlatform;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Drives the platform's discovery cycles
///
/// The platform itself knows nothing about timers; this collaborator runs
/// one startup cycle and then, when periodic discovery is enabled in the
/// config, repeats it on the configured interval until stopped.
///
/// # Example
///
/// ```no_run
/// use blink_bridge::{BridgeConfig, BridgePlatform, DiscoveryScheduler};
/// use std::sync::Arc;
///
/// # async fn run(platform: Arc<BridgePlatform>) {
/// let mut scheduler = DiscoveryScheduler::new();
/// scheduler.start(platform).await;
/// // ... host runs ...
/// scheduler.stop().await;
/// # }
/// ```
pub struct DiscoveryScheduler {
    stop_tx: Option<broadcast::Sender<()>>,
    task_handle: Option<tokio::task::JoinHandle<()>>,
}

impl DiscoveryScheduler {
    /// Create a new, idle scheduler
    pub fn new() -> Self {
        Self {
            stop_tx: None,
            task_handle: None,
        }
    }

    /// Start driving discovery in the background
    ///
    /// If the scheduler is already running, it is stopped and restarted.
    pub async fn start(&mut self, platform: Arc<BridgePlatform>) {
        self.stop().await;

        let (stop_tx, _) = broadcast::channel(1);
        self.stop_tx = Some(stop_tx.clone());

        let periodic = platform.config().discovery;
        let every = Duration::from_secs(platform.config().discovery_interval_secs);

        let handle = tokio::spawn(async move {
            let mut stop_rx = stop_tx.subscribe();

            // Startup cycle
            platform.discover().await;

            if !periodic {
                tracing::info!("Periodic discovery disabled, startup cycle only");
                return;
            }

            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = stop_rx.recv() => {
                        tracing::info!("Discovery scheduler stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        platform.discover().await;
                    }
                }
            }
        });

        self.task_handle = Some(handle);
    }

    /// Stop the background task
    ///
    /// Any cycle already in flight runs to completion.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.task_handle.take() {
            // Give it a moment to stop gracefully
            let _ = tokio::time::timeout(Duration::from_millis(500), handle).await;
        }
    }
}

impl Default for DiscoveryScheduler {
    fn default() -> Self {
        Self::new()
    }
}
