//! Run the bridge against an in-memory gateway
//!
//! Demonstrates wiring: an in-memory `Gateway` standing in for the Blink
//! cloud, a host that prints registry calls, one discovery cycle, and a
//! toggle on each discovered switch.
//!
//! ```sh
//! cargo run --example bridge
//! ```

use async_trait::async_trait;
use blink_bridge::{
    AccessoryHost, AccessoryRecord, BridgeConfig, BridgePlatform, CameraEntity, EntityId,
    Gateway, NetworkEntity, Result, Snapshot,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Gateway over a fixed in-memory system: one network, two cameras
struct InMemoryGateway {
    snapshot: Mutex<Snapshot>,
}

impl InMemoryGateway {
    fn new() -> Self {
        let cameras = BTreeMap::from([
            (
                "1001".to_string(),
                CameraEntity {
                    id: "1001".to_string(),
                    name: "Porch".to_string(),
                    active: true,
                },
            ),
            (
                "1002".to_string(),
                CameraEntity {
                    id: "1002".to_string(),
                    name: "Garage".to_string(),
                    active: false,
                },
            ),
        ]);
        Self {
            snapshot: Mutex::new(Snapshot {
                networks: vec![NetworkEntity {
                    id: "42".to_string(),
                    name: "Home".to_string(),
                    active: false,
                }],
                cameras,
            }),
        }
    }
}

#[async_trait]
impl Gateway for InMemoryGateway {
    async fn authenticate(&self) -> Result<()> {
        Ok(())
    }

    async fn refresh_snapshot(&self) -> Result<Snapshot> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn armed_state(&self, network_id: &EntityId) -> Result<Option<bool>> {
        let snapshot = self.snapshot.lock().unwrap();
        Ok(snapshot.network(network_id).map(|network| network.active))
    }

    async fn set_armed_state(&self, value: bool, network_ids: &[EntityId]) -> Result<()> {
        let mut snapshot = self.snapshot.lock().unwrap();
        for network in &mut snapshot.networks {
            if network_ids.contains(&network.id) {
                network.active = value;
            }
        }
        Ok(())
    }

    async fn list_cameras(&self) -> Result<BTreeMap<EntityId, CameraEntity>> {
        Ok(self.snapshot.lock().unwrap().cameras.clone())
    }

    async fn prime_links(&self) -> Result<()> {
        Ok(())
    }

    async fn set_motion_detect(&self, camera_id: &EntityId, value: bool) -> Result<()> {
        let mut snapshot = self.snapshot.lock().unwrap();
        if let Some(camera) = snapshot.cameras.get_mut(camera_id) {
            camera.active = value;
        }
        Ok(())
    }
}

/// Host that just prints what the platform asks of it
struct PrintingHost;

impl AccessoryHost for PrintingHost {
    fn attach_switch(&self, record: &AccessoryRecord) {
        println!("host: wiring switch service for {}", record.display_name);
    }

    fn register(&self, records: &[AccessoryRecord]) {
        for record in records {
            println!("host: registered {} ({})", record.display_name, record.uuid);
        }
    }

    fn unregister(&self, records: &[AccessoryRecord]) {
        for record in records {
            println!("host: unregistered {}", record.display_name);
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = BridgeConfig::new("Blink System", "demo@example.com", "demo");
    let platform = Arc::new(BridgePlatform::new(
        config,
        Arc::new(InMemoryGateway::new()),
        Arc::new(PrintingHost),
    ));

    platform.discover().await;

    for record in platform.accessories() {
        let before = platform.read_state(&record.uuid).await;
        let after = platform.write_state(&record.uuid, true).await;
        println!(
            "{}: {:?} -> {:?}",
            record.display_name, before, after
        );
    }
}
