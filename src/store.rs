use std::sync::{Arc, RwLock};

use crate::models::Device;

/// In-memory store of the device fleet, replaced wholesale on each refresh.
///
/// Wrapped in `Arc` so it can be cheaply cloned and shared across tasks.
/// Access is synchronous and non-blocking (readers take a snapshot clone),
/// so a `std::sync::RwLock` suffices; no lock is ever held across an await.
/// Tests construct it from whatever seed fleet they need.
#[derive(Clone)]
pub struct DeviceStore {
    inner: Arc<RwLock<Vec<Device>>>,
}

impl DeviceStore {
    pub fn new(seed: Vec<Device>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(seed)),
        }
    }

    /// Snapshot of the whole fleet in seed order.
    pub fn devices(&self) -> Vec<Device> {
        self.inner.read().expect("device store lock poisoned").clone()
    }

    /// Latest state of a single device, if it exists in the fleet.
    pub fn get(&self, device_id: &str) -> Option<Device> {
        self.inner
            .read()
            .expect("device store lock poisoned")
            .iter()
            .find(|d| d.id == device_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("device store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the entire fleet with a freshly generated snapshot. This is
    /// the only mutation path; individual devices are never edited in place.
    pub fn replace_all(&self, devices: Vec<Device>) {
        *self.inner.write().expect("device store lock poisoned") = devices;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::seed::seed_devices;

    #[test]
    fn empty_store_returns_nothing() {
        let store = DeviceStore::new(vec![]);
        assert!(store.devices().is_empty());
        assert!(store.get("device-001").is_none());
    }

    #[test]
    fn get_finds_seeded_device() {
        let store = DeviceStore::new(seed_devices(Utc::now()));
        let device = store.get("device-002").unwrap();
        assert_eq!(device.name, "Weather Station #2");
        assert!(store.get("device-999").is_none());
    }

    #[test]
    fn replace_all_swaps_the_whole_fleet() {
        let now = Utc::now();
        let store = DeviceStore::new(seed_devices(now));

        let mut next = seed_devices(now);
        next[0].battery_level = 50.0;
        store.replace_all(next);

        assert_eq!(store.get("device-001").unwrap().battery_level, 50.0);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn clone_shares_state() {
        let now = Utc::now();
        let store = DeviceStore::new(seed_devices(now));
        let clone = store.clone();

        let mut next = seed_devices(now);
        next.truncate(1);
        store.replace_all(next);

        assert_eq!(clone.len(), 1);
    }
}
