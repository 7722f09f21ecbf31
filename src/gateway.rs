use crate::error::Result;
use crate::types::{CameraEntity, EntityId, Snapshot};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Client seam for the remote Blink cloud API
///
/// The bridge core never talks to the cloud directly; it drives an
/// implementation of this trait. Implementations own transport, credentials,
/// and retry behavior. All methods may suspend, and every call site in the
/// core treats a failure as terminal for the operation that made it.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// (Re)establish the remote session
    ///
    /// Heavyweight call. The platform throttles it to roughly once per day;
    /// implementations do not need their own cadence logic.
    async fn authenticate(&self) -> Result<()>;

    /// Fetch a full snapshot of networks and cameras
    ///
    /// The returned entities replace the previous snapshot wholesale.
    async fn refresh_snapshot(&self) -> Result<Snapshot>;

    /// Read the armed state of a network
    ///
    /// Returns `Ok(None)` when the network id is not known to the gateway;
    /// that is a resolution miss, not an error.
    async fn armed_state(&self, network_id: &EntityId) -> Result<Option<bool>>;

    /// Arm or disarm the given networks
    async fn set_armed_state(&self, value: bool, network_ids: &[EntityId]) -> Result<()>;

    /// Fetch the current camera list keyed by entity id
    async fn list_cameras(&self) -> Result<BTreeMap<EntityId, CameraEntity>>;

    /// Prime the camera link list
    ///
    /// The remote API requires this call before a motion-detection toggle;
    /// no return value is consumed.
    async fn prime_links(&self) -> Result<()>;

    /// Enable or disable motion detection on a camera
    async fn set_motion_detect(&self, camera_id: &EntityId, value: bool) -> Result<()>;
}
