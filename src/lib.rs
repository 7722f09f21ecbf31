//! Bridge core exposing Blink security networks and cameras as switch
//! accessories in a smart-home host platform
//!
//! This library is the translation layer of a Blink camera plugin. It polls
//! a remote gateway for the current set of networks and cameras, reconciles
//! that snapshot against a registry of host-platform accessory records, and
//! forwards user toggles back to the gateway. It supports:
//!
//! - Periodic, lock-serialized discovery with add/update/remove semantics
//! - Deterministic accessory identity across restarts (v5 uuids)
//! - Restoring accessories from the host's persisted cache
//! - Arm/disarm of networks and motion-detection toggles on cameras,
//!   serialized per entity
//! - Throttled re-authentication against the remote session's daily expiry
//!
//! The remote API client and the host platform itself stay outside this
//! crate, behind the [`Gateway`] and [`AccessoryHost`] traits.
//!
//! # Quick Start
//!
//! ```no_run
//! use blink_bridge::{
//!     AccessoryHost, BridgeConfig, BridgePlatform, DiscoveryScheduler, Gateway,
//! };
//! use std::sync::Arc;
//!
//! # fn collaborators() -> (Arc<dyn Gateway>, Arc<dyn AccessoryHost>) { unimplemented!() }
//! #[tokio::main]
//! async fn main() {
//!     // Gateway and host implementations come from the surrounding plugin
//!     let (gateway, host) = collaborators();
//!
//!     let config = BridgeConfig::new("Blink System", "me@example.com", "PASSWORD");
//!     let platform = Arc::new(BridgePlatform::new(config, gateway, host));
//!
//!     // Restore cached accessories before the first cycle, then let the
//!     // scheduler drive discovery.
//!     let mut scheduler = DiscoveryScheduler::new();
//!     scheduler.start(platform.clone()).await;
//!
//!     // Characteristic handlers installed by the host call back into:
//!     for record in platform.accessories() {
//!         let on = platform.read_state(&record.uuid).await;
//!         println!("{}: {:?}", record.display_name, on);
//!     }
//!
//!     scheduler.stop().await;
//! }
//! ```
//!
//! # Architecture
//!
//! - **Platform**: registry of accessory records and the discovery cycle
//! - **Switch adapter**: accessory on/off get/set against the gateway
//! - **Scheduler**: startup and periodic discovery triggers
//! - **Gateway / AccessoryHost**: seams for the remote API client and the
//!   host platform's accessory cache
//! - **Types**: entities, snapshots, and accessory records

mod config;
mod error;
mod gateway;
mod host;
mod locks;
#[cfg(test)]
mod mock;
mod platform;
mod scheduler;
mod session;
mod switch;
mod types;

// Public exports
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use gateway::Gateway;
pub use host::AccessoryHost;
pub use platform::{BridgePlatform, PLATFORM_NAME};
pub use scheduler::DiscoveryScheduler;
pub use types::{
    AccessoryRecord, CameraEntity, EntityId, EntityRef, NetworkEntity, Snapshot,
};
