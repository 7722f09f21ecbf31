use crate::config::BridgeConfig;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::host::AccessoryHost;
use crate::locks::LockMap;
use crate::session::Session;
use crate::types::{AccessoryRecord, CameraEntity, EntityRef, NetworkEntity, Snapshot};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use uuid::Uuid;

/// Namespace component of every accessory uuid
pub const PLATFORM_NAME: &str = "homebridge-blinkcameras";

/// Pause after a discovery cycle so host-side registration settles before
/// the next cycle or accessory action proceeds
const DISCOVERY_SETTLE: Duration = Duration::from_millis(1500);

/// The bridge platform: reconciles gateway snapshots into accessory records
///
/// Owns the registry of accessory records keyed by their deterministic uuid,
/// the cached gateway snapshot, and the discovery lock. The host platform
/// drives it from two directions: a scheduler (or startup event) calls
/// [`discover`](Self::discover), and cached accessories arrive through
/// [`configure_accessory`](Self::configure_accessory). Switch get/set
/// handlers live in the adapter half of this type (see `switch.rs`).
///
/// # Example
///
/// ```no_run
/// use blink_bridge::{BridgeConfig, BridgePlatform};
/// use std::sync::Arc;
///
/// # async fn run(gateway: Arc<dyn blink_bridge::Gateway>, host: Arc<dyn blink_bridge::AccessoryHost>) {
/// let config = BridgeConfig::new("Blink System", "me@example.com", "PASSWORD");
/// let platform = Arc::new(BridgePlatform::new(config, gateway, host));
///
/// platform.discover().await;
/// for record in platform.accessories() {
///     println!("{} reachable={}", record.display_name, record.reachable);
/// }
/// # }
/// ```
pub struct BridgePlatform {
    config: BridgeConfig,
    gateway: Arc<dyn Gateway>,
    host: Arc<dyn AccessoryHost>,
    state: Mutex<PlatformState>,
    /// Serializes discovery cycles; queued waiters run in arrival order
    discovery_lock: tokio::sync::Mutex<()>,
    pub(crate) entity_locks: LockMap,
}

/// Registry and snapshot state, held only for brief synchronous sections
struct PlatformState {
    registry: BTreeMap<Uuid, AccessoryRecord>,
    snapshot: Snapshot,
    session: Session,
}

impl BridgePlatform {
    /// Create a platform over the given gateway and host collaborators
    pub fn new(
        config: BridgeConfig,
        gateway: Arc<dyn Gateway>,
        host: Arc<dyn AccessoryHost>,
    ) -> Self {
        Self {
            config,
            gateway,
            host,
            state: Mutex::new(PlatformState {
                registry: BTreeMap::new(),
                snapshot: Snapshot::default(),
                session: Session::new(),
            }),
            discovery_lock: tokio::sync::Mutex::new(()),
            entity_locks: LockMap::new(),
        }
    }

    /// Get the platform configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub(crate) fn gateway(&self) -> &Arc<dyn Gateway> {
        &self.gateway
    }

    /// Derive the accessory uuid for an entity id
    ///
    /// v5 uuid over the platform namespace, the configured platform name,
    /// and the entity id, so the same entity always yields the same uuid
    /// across restarts and snapshots.
    pub fn accessory_uuid(&self, entity_id: &str) -> Uuid {
        let key = format!("{}-{}-{}", PLATFORM_NAME, self.config.name, entity_id);
        Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes())
    }

    /// Get a snapshot of the current accessory records
    pub fn accessories(&self) -> Vec<AccessoryRecord> {
        let state = self.state.lock().unwrap();
        state.registry.values().cloned().collect()
    }

    /// Look up a single accessory record by uuid
    pub fn accessory(&self, uuid: &Uuid) -> Option<AccessoryRecord> {
        let state = self.state.lock().unwrap();
        state.registry.get(uuid).cloned()
    }

    /// Check an entity reference against the cached snapshot
    pub(crate) fn snapshot_resolves(&self, entity: &EntityRef) -> bool {
        let state = self.state.lock().unwrap();
        state.snapshot.resolve(entity)
    }

    /// Restore a cached accessory record at host startup
    ///
    /// The record is speculatively marked reachable and wired up; the next
    /// discovery cycle corrects reachability against a real snapshot.
    pub fn configure_accessory(&self, mut record: AccessoryRecord) {
        record.reachable = true;
        let uuid = record.uuid;
        let name = record.display_name.clone();
        {
            let mut state = self.state.lock().unwrap();
            state.registry.insert(uuid, record);
        }
        tracing::info!("[{}] Loaded cached accessory", name);
        self.initialize(&uuid);
    }

    /// Run one discovery cycle
    ///
    /// Concurrent calls never interleave: a trigger that arrives while a
    /// cycle is in flight waits for the active cycle's scoped guard to drop
    /// and then runs in full. Failures are logged here and never propagate.
    pub async fn discover(&self) {
        tracing::info!("Discovering networks and cameras");
        let _guard = self.discovery_lock.lock().await;
        if let Err(e) = self.run_cycle().await {
            tracing::error!("Discovery cycle failed: {}", e);
        }
    }

    async fn run_cycle(&self) -> Result<()> {
        // Snapshot fetch failures abort the whole cycle and leave the
        // registry at its last-known-good state.
        self.ensure_session().await?;
        let snapshot = self.gateway.refresh_snapshot().await?;

        // Reconcile every known record against the fresh snapshot before
        // anything new is added, so an entity that moved is never
        // double-added within one cycle.
        let (pending_init, stale) = {
            let mut state = self.state.lock().unwrap();
            state.snapshot = snapshot.clone();

            let mut pending_init = Vec::new();
            let mut stale_ids = Vec::new();
            for record in state.registry.values_mut() {
                if snapshot.resolve(&record.entity) {
                    record.reachable = true;
                    if !record.initialized {
                        pending_init.push(record.uuid);
                    }
                } else {
                    record.reachable = false;
                    stale_ids.push(record.uuid);
                }
            }

            let stale: Vec<AccessoryRecord> = stale_ids
                .into_iter()
                .filter_map(|uuid| state.registry.remove(&uuid))
                .collect();
            (pending_init, stale)
        };

        for uuid in pending_init {
            self.initialize(&uuid);
        }

        // Unregister before adding, so any registration slot freed here is
        // available again within the same cycle.
        if !stale.is_empty() {
            for record in &stale {
                tracing::info!("[{}] Unregistering", record.display_name);
            }
            self.host.unregister(&stale);
        }

        for network in &snapshot.networks {
            self.add_network(network);
        }
        for camera in snapshot.cameras.values() {
            self.add_camera(camera);
        }

        // Let host-side registration side effects settle before the
        // discovery guard drops.
        sleep(DISCOVERY_SETTLE).await;
        Ok(())
    }

    /// Re-authenticate with the remote API when the session has gone stale
    pub(crate) async fn ensure_session(&self) -> Result<()> {
        let now = Instant::now();
        let due = {
            let state = self.state.lock().unwrap();
            state.session.needs_refresh(now)
        };
        if !due {
            return Ok(());
        }

        tracing::info!("Authenticating with Blink API as {}", self.config.username);
        self.gateway.authenticate().await?;

        let mut state = self.state.lock().unwrap();
        state.session.mark_refreshed(now);
        Ok(())
    }

    fn add_network(&self, network: &NetworkEntity) {
        let uuid = self.accessory_uuid(&network.id);
        let record = AccessoryRecord::new(
            uuid,
            format!("{} System", network.name),
            EntityRef::Network {
                id: network.id.clone(),
            },
        );
        self.add_accessory(record);
    }

    fn add_camera(&self, camera: &CameraEntity) {
        let uuid = self.accessory_uuid(&camera.id);
        let record = AccessoryRecord::new(
            uuid,
            format!("{} Camera", camera.name),
            EntityRef::Camera {
                id: camera.id.clone(),
            },
        );
        self.add_accessory(record);
    }

    /// Insert and register a record unless its uuid is already tracked
    fn add_accessory(&self, mut record: AccessoryRecord) {
        let uuid = record.uuid;
        {
            let mut state = self.state.lock().unwrap();
            if state.registry.contains_key(&uuid) {
                return;
            }
            record.reachable = true;
            state.registry.insert(uuid, record.clone());
        }
        tracing::info!("[{}] Added", record.display_name);
        self.initialize(&uuid);

        if let Some(record) = self.accessory(&uuid) {
            self.host.register(std::slice::from_ref(&record));
        }
    }

    /// Perform one-time switch wiring for a record
    ///
    /// Idempotent: records that are already initialized are skipped with no
    /// host-facing side effects.
    fn initialize(&self, uuid: &Uuid) {
        let record = {
            let state = self.state.lock().unwrap();
            match state.registry.get(uuid) {
                Some(record) if !record.initialized => record.clone(),
                _ => return,
            }
        };

        self.host.attach_switch(&record);

        let mut state = self.state.lock().unwrap();
        if let Some(record) = state.registry.get_mut(uuid) {
            record.initialized = true;
        }
        tracing::info!("[{}] Initialized", record.display_name);
    }
}
