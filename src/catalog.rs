use crate::models::Alert;

/// Read-only lookup over the static alert set.
///
/// The catalog never creates, updates, or deletes alerts; it only filters
/// the seed records by device. A miss is an empty list, not an error.
#[derive(Clone)]
pub struct AlertCatalog {
    alerts: Vec<Alert>,
}

impl AlertCatalog {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    /// All alerts for `device_id`, in seed order.
    pub fn alerts_for_device(&self, device_id: &str) -> Vec<Alert> {
        self.alerts
            .iter()
            .filter(|a| a.device_id == device_id)
            .cloned()
            .collect()
    }
}
