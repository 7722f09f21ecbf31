use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Remote-assigned stable entity identifier
pub type EntityId = String;

/// A Blink network (sync module group) as returned by the gateway
///
/// Entities are ephemeral: the gateway replaces them wholesale on every
/// snapshot refresh. The bridge only reads them, it never mutates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkEntity {
    pub id: EntityId,
    pub name: String,

    /// Armed state of the network
    ///
    /// The remote API calls this "armed" for networks and "enabled" for
    /// cameras; the bridge treats both as one canonical active flag.
    #[serde(alias = "armed")]
    pub active: bool,
}

/// A Blink camera as returned by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraEntity {
    pub id: EntityId,
    pub name: String,

    /// Motion-detection enabled state (canonical active flag)
    #[serde(alias = "enabled")]
    pub active: bool,
}

/// One full gateway snapshot of networks and cameras
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub networks: Vec<NetworkEntity>,

    /// Cameras keyed by entity id
    #[serde(default)]
    pub cameras: BTreeMap<EntityId, CameraEntity>,
}

impl Snapshot {
    /// Look up a network by entity id
    pub fn network(&self, id: &str) -> Option<&NetworkEntity> {
        self.networks.iter().find(|network| network.id == id)
    }

    /// Look up a camera by entity id
    pub fn camera(&self, id: &str) -> Option<&CameraEntity> {
        self.cameras.get(id)
    }

    /// Check whether the entity referenced by `entity` is present
    ///
    /// Resolution is by id within the referenced kind's collection; a camera
    /// reference never resolves against a network with the same id.
    pub fn resolve(&self, entity: &EntityRef) -> bool {
        match entity {
            EntityRef::Network { id } => self.network(id).is_some(),
            EntityRef::Camera { id } => self.camera(id).is_some(),
        }
    }
}

/// Weak reference to the remote entity an accessory represents
///
/// Carries the id and kind only. The entity itself is re-resolved against the
/// latest snapshot each cycle, since entities are replaced on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityRef {
    Network { id: EntityId },
    Camera { id: EntityId },
}

impl EntityRef {
    /// Get the referenced entity id
    pub fn id(&self) -> &EntityId {
        match self {
            EntityRef::Network { id } | EntityRef::Camera { id } => id,
        }
    }

    /// True when this reference points at a network
    pub fn is_network(&self) -> bool {
        matches!(self, EntityRef::Network { .. })
    }
}

/// Locally owned accessory record shown in the host platform
///
/// Records are created once per uuid and then only updated; the registry
/// never recreates a record for an entity it already tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessoryRecord {
    /// Deterministic identifier derived from the platform namespace,
    /// configured platform name, and entity id
    pub uuid: Uuid,

    pub display_name: String,

    /// Which remote entity this accessory mirrors
    pub entity: EntityRef,

    /// True while the entity was present in the latest snapshot
    #[serde(skip)]
    pub reachable: bool,

    /// True once switch-service wiring has been performed
    ///
    /// One-way transition; re-initializing an initialized record is a no-op.
    #[serde(skip)]
    pub initialized: bool,
}

impl AccessoryRecord {
    /// Create a fresh, unwired record for a discovered entity
    pub fn new(uuid: Uuid, display_name: impl Into<String>, entity: EntityRef) -> Self {
        Self {
            uuid,
            display_name: display_name.into(),
            entity,
            reachable: false,
            initialized: false,
        }
    }
}
