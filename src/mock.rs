//! Test doubles for the gateway and host collaborators

use crate::error::{BridgeError, Result};
use crate::gateway::Gateway;
use crate::host::AccessoryHost;
use crate::types::{AccessoryRecord, CameraEntity, EntityId, NetworkEntity, Snapshot};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

pub(crate) fn network(id: &str, active: bool) -> NetworkEntity {
    NetworkEntity {
        id: id.to_string(),
        name: format!("Network {}", id),
        active,
    }
}

pub(crate) fn camera(id: &str, active: bool) -> CameraEntity {
    CameraEntity {
        id: id.to_string(),
        name: format!("Camera {}", id),
        active,
    }
}

/// Scripted gateway with call recording and failure switches
///
/// Fetches panic when they overlap, which turns any violation of the
/// discovery or per-entity serialization rules into a test failure.
pub(crate) struct MockGateway {
    snapshot: Mutex<Snapshot>,
    calls: Mutex<Vec<String>>,
    armed_writes: Mutex<Vec<(bool, Vec<EntityId>)>>,
    motion_writes: Mutex<Vec<(EntityId, bool)>>,
    authenticate_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    fail_authenticate: AtomicBool,
    fail_refresh: AtomicBool,
    fail_actions: AtomicBool,
    refresh_delay: Mutex<Duration>,
    action_delay: Mutex<Duration>,
    refresh_in_flight: AtomicBool,
    action_in_flight: AtomicBool,
}

impl MockGateway {
    pub(crate) fn new() -> Self {
        Self {
            snapshot: Mutex::new(Snapshot::default()),
            calls: Mutex::new(Vec::new()),
            armed_writes: Mutex::new(Vec::new()),
            motion_writes: Mutex::new(Vec::new()),
            authenticate_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            fail_authenticate: AtomicBool::new(false),
            fail_refresh: AtomicBool::new(false),
            fail_actions: AtomicBool::new(false),
            refresh_delay: Mutex::new(Duration::ZERO),
            action_delay: Mutex::new(Duration::ZERO),
            refresh_in_flight: AtomicBool::new(false),
            action_in_flight: AtomicBool::new(false),
        }
    }

    pub(crate) fn set_snapshot(&self, snapshot: Snapshot) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    pub(crate) fn fail_authenticate(&self, fail: bool) {
        self.fail_authenticate.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_refresh(&self, fail: bool) {
        self.fail_refresh.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_actions(&self, fail: bool) {
        self.fail_actions.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_refresh_delay(&self, delay: Duration) {
        *self.refresh_delay.lock().unwrap() = delay;
    }

    pub(crate) fn set_action_delay(&self, delay: Duration) {
        *self.action_delay.lock().unwrap() = delay;
    }

    pub(crate) fn authenticate_calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn armed_writes(&self) -> Vec<(bool, Vec<EntityId>)> {
        self.armed_writes.lock().unwrap().clone()
    }

    pub(crate) fn motion_writes(&self) -> Vec<(EntityId, bool)> {
        self.motion_writes.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn authenticate(&self) -> Result<()> {
        self.record("authenticate");
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_authenticate.load(Ordering::SeqCst) {
            return Err(BridgeError::Authentication("mock auth failure".into()));
        }
        Ok(())
    }

    async fn refresh_snapshot(&self) -> Result<Snapshot> {
        self.record("refresh_snapshot");
        assert!(
            !self.refresh_in_flight.swap(true, Ordering::SeqCst),
            "overlapping snapshot fetches"
        );
        let delay = *self.refresh_delay.lock().unwrap();
        if delay > Duration::ZERO {
            sleep(delay).await;
        }
        self.refresh_in_flight.store(false, Ordering::SeqCst);

        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_refresh.load(Ordering::SeqCst) {
            return Err(BridgeError::Gateway("mock fetch failure".into()));
        }
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn armed_state(&self, network_id: &EntityId) -> Result<Option<bool>> {
        self.record("armed_state");
        if self.fail_actions.load(Ordering::SeqCst) {
            return Err(BridgeError::Gateway("mock summary failure".into()));
        }
        let snapshot = self.snapshot.lock().unwrap();
        Ok(snapshot.network(network_id).map(|network| network.active))
    }

    async fn set_armed_state(&self, value: bool, network_ids: &[EntityId]) -> Result<()> {
        self.record("set_armed_state");
        assert!(
            !self.action_in_flight.swap(true, Ordering::SeqCst),
            "overlapping gateway actions"
        );
        let delay = *self.action_delay.lock().unwrap();
        if delay > Duration::ZERO {
            sleep(delay).await;
        }
        self.action_in_flight.store(false, Ordering::SeqCst);

        if self.fail_actions.load(Ordering::SeqCst) {
            return Err(BridgeError::Gateway("mock arm failure".into()));
        }
        self.armed_writes
            .lock()
            .unwrap()
            .push((value, network_ids.to_vec()));
        Ok(())
    }

    async fn list_cameras(&self) -> Result<BTreeMap<EntityId, CameraEntity>> {
        self.record("list_cameras");
        if self.fail_actions.load(Ordering::SeqCst) {
            return Err(BridgeError::Gateway("mock camera list failure".into()));
        }
        Ok(self.snapshot.lock().unwrap().cameras.clone())
    }

    async fn prime_links(&self) -> Result<()> {
        self.record("prime_links");
        if self.fail_actions.load(Ordering::SeqCst) {
            return Err(BridgeError::Gateway("mock prime failure".into()));
        }
        Ok(())
    }

    async fn set_motion_detect(&self, camera_id: &EntityId, value: bool) -> Result<()> {
        self.record("set_motion_detect");
        if self.fail_actions.load(Ordering::SeqCst) {
            return Err(BridgeError::Gateway("mock motion failure".into()));
        }
        self.motion_writes
            .lock()
            .unwrap()
            .push((camera_id.clone(), value));
        Ok(())
    }
}

/// Host double that records registry-facing calls
pub(crate) struct RecordingHost {
    attached: Mutex<Vec<Uuid>>,
    registered: Mutex<Vec<Vec<Uuid>>>,
    unregistered: Mutex<Vec<Vec<Uuid>>>,
}

impl RecordingHost {
    pub(crate) fn new() -> Self {
        Self {
            attached: Mutex::new(Vec::new()),
            registered: Mutex::new(Vec::new()),
            unregistered: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn attached(&self) -> Vec<Uuid> {
        self.attached.lock().unwrap().clone()
    }

    pub(crate) fn registered(&self) -> Vec<Vec<Uuid>> {
        self.registered.lock().unwrap().clone()
    }

    pub(crate) fn unregistered(&self) -> Vec<Vec<Uuid>> {
        self.unregistered.lock().unwrap().clone()
    }
}

impl AccessoryHost for RecordingHost {
    fn attach_switch(&self, record: &AccessoryRecord) {
        self.attached.lock().unwrap().push(record.uuid);
    }

    fn register(&self, records: &[AccessoryRecord]) {
        self.registered
            .lock()
            .unwrap()
            .push(records.iter().map(|record| record.uuid).collect());
    }

    fn unregister(&self, records: &[AccessoryRecord]) {
        self.unregistered
            .lock()
            .unwrap()
            .push(records.iter().map(|record| record.uuid).collect());
    }
}
