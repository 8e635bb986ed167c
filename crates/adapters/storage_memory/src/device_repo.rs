//! In-memory implementation of [`DeviceRepository`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use fieldlink_app::ports::{DeviceRepository, InsertOutcome};
use fieldlink_domain::device::Device;
use fieldlink_domain::error::FieldlinkError;
use fieldlink_domain::id::DeviceId;

use crate::error::StorageError;

/// Device registry backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryDeviceRepository {
    devices: Mutex<HashMap<DeviceId, Device>>,
}

impl InMemoryDeviceRepository {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<DeviceId, Device>>, StorageError> {
        self.devices
            .lock()
            .map_err(|_| StorageError::Poisoned("device registry"))
    }
}

impl DeviceRepository for InMemoryDeviceRepository {
    fn insert_if_absent(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<InsertOutcome, FieldlinkError>> + Send {
        let result = self.lock().map(|mut devices| {
            if let Some(existing) = devices.get(&device.device_id) {
                return InsertOutcome::Existing(existing.clone());
            }
            devices.insert(device.device_id.clone(), device.clone());
            InsertOutcome::Created(device)
        });
        async { result.map_err(FieldlinkError::from) }
    }

    fn get_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, FieldlinkError>> + Send {
        let result = self.lock().map(|devices| devices.get(id).cloned());
        async { result.map_err(FieldlinkError::from) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, FieldlinkError>> + Send {
        let result = self.lock().map(|devices| {
            let mut all: Vec<Device> = devices.values().cloned().collect();
            all.sort_by(|a, b| a.device_id.cmp(&b.device_id));
            all
        });
        async { result.map_err(FieldlinkError::from) }
    }

    fn modify<F, T>(
        &self,
        id: &DeviceId,
        f: F,
    ) -> impl Future<Output = Result<Option<T>, FieldlinkError>> + Send
    where
        F: FnOnce(&mut Device) -> T + Send,
        T: Send,
    {
        let result = self.lock().map(|mut devices| devices.get_mut(id).map(f));
        async { result.map_err(FieldlinkError::from) }
    }
}
