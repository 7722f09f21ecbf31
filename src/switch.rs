use crate::platform::BridgePlatform;
use crate::types::EntityRef;
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

/// Pause after a mutating gateway call; the remote system needs time to
/// apply state before it reports the new value
const ACTION_SETTLE: Duration = Duration::from_secs(3);

/// Switch adapter: translates accessory on/off traffic into gateway calls
///
/// Both operations return `Option` rather than `Result`: `None` means the
/// host callback is simply not invoked (the host's own characteristic
/// request then times out), which is the accepted failure mode for a stale
/// or unreachable accessory. Gateway errors are logged here and never
/// propagate further.
impl BridgePlatform {
    /// Read the current on/off state for an accessory
    ///
    /// Lock-free best-effort read: it may observe a stale value while a
    /// write on the same entity is in flight, which is acceptable for a
    /// polled accessory status. Returns `None` when the record or its
    /// entity cannot be resolved, or on a gateway error.
    pub async fn read_state(&self, uuid: &Uuid) -> Option<bool> {
        if let Err(e) = self.ensure_session().await {
            tracing::warn!("Session refresh failed before read: {}", e);
            return None;
        }
        let record = self.accessory(uuid)?;

        match &record.entity {
            EntityRef::Network { id } => match self.gateway().armed_state(id).await {
                Ok(Some(armed)) => {
                    tracing::info!(
                        "[{}] is {}",
                        record.display_name,
                        if armed { "armed" } else { "disarmed" }
                    );
                    Some(armed)
                }
                Ok(None) => None,
                Err(e) => {
                    tracing::warn!("Couldn't retrieve network status: {}", e);
                    None
                }
            },
            EntityRef::Camera { id } => match self.gateway().list_cameras().await {
                Ok(cameras) => cameras.get(id).map(|camera| {
                    tracing::info!(
                        "[{}] is {}",
                        record.display_name,
                        if camera.active { "armed" } else { "disarmed" }
                    );
                    camera.active
                }),
                Err(e) => {
                    tracing::warn!("Couldn't retrieve camera status: {}", e);
                    None
                }
            },
        }
    }

    /// Apply an on/off toggle to an accessory
    ///
    /// Serialized per entity: two writes against the same entity queue on
    /// its lock, while writes to different entities proceed concurrently.
    /// On success the settle delay elapses before `Some(value)` is
    /// returned, so the host reports the new state only once the remote
    /// system has had time to apply it.
    pub async fn write_state(&self, uuid: &Uuid, value: bool) -> Option<bool> {
        if let Err(e) = self.ensure_session().await {
            tracing::warn!("Session refresh failed before write: {}", e);
            return None;
        }
        let record = self.accessory(uuid)?;

        let lock = self.entity_locks.entry(record.entity.id());
        let _guard = lock.lock().await;

        // The entity may have vanished between reconciliation cycles; a
        // write against a stale record is silently dropped.
        if !self.snapshot_resolves(&record.entity) {
            tracing::debug!("[{}] entity gone, dropping write", record.display_name);
            return None;
        }

        let result = match &record.entity {
            EntityRef::Network { id } => {
                self.gateway()
                    .set_armed_state(value, std::slice::from_ref(id))
                    .await
            }
            EntityRef::Camera { id } => {
                // The remote API requires the link list to be primed before
                // a motion-detection toggle.
                match self.gateway().prime_links().await {
                    Ok(()) => self.gateway().set_motion_detect(id, value).await,
                    Err(e) => Err(e),
                }
            }
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    "[{}] {}",
                    record.display_name,
                    if value { "arm" } else { "disarm" }
                );
                sleep(ACTION_SETTLE).await;
                Some(value)
            }
            Err(e) => {
                tracing::warn!("[{}] toggle failed: {}", record.display_name, e);
                None
            }
        }
    }
}
