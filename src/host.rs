use crate::types::AccessoryRecord;

/// Seam for the host platform's accessory registry
///
/// The host owns the cache of platform accessories and the HomeKit-facing
/// service objects. The bridge core only asks it to wire a switch service
/// onto a record and to register/unregister records as discovery adds and
/// removes them. Host calls are assumed reliable; the core does not retry
/// them.
pub trait AccessoryHost: Send + Sync {
    /// Perform one-time UI wiring for a record
    ///
    /// Creates the switch service and hooks its on/off characteristic
    /// handlers up to the bridge. Called exactly once per record, during
    /// initialization.
    fn attach_switch(&self, record: &AccessoryRecord);

    /// Register newly discovered accessories with the host platform
    fn register(&self, records: &[AccessoryRecord]);

    /// Unregister accessories whose entities disappeared from the snapshot
    fn unregister(&self, records: &[AccessoryRecord]);
}
