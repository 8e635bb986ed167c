//! Storage port — keyed repository for paired devices.

use std::future::Future;
use std::sync::Arc;

use fieldlink_domain::device::Device;
use fieldlink_domain::error::FieldlinkError;
use fieldlink_domain::id::DeviceId;

/// Result of [`DeviceRepository::insert_if_absent`].
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// The device was not known and has been stored as given.
    Created(Device),
    /// A device with the same id already existed; it is returned untouched.
    Existing(Device),
}

impl InsertOutcome {
    /// The stored device, whichever branch was taken.
    #[must_use]
    pub fn device(&self) -> &Device {
        match self {
            Self::Created(device) | Self::Existing(device) => device,
        }
    }
}

/// Repository for [`Device`]s keyed by [`DeviceId`].
///
/// Each call is atomic with respect to concurrent calls.
pub trait DeviceRepository {
    /// Store `device` unless its id is already present.
    fn insert_if_absent(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<InsertOutcome, FieldlinkError>> + Send;

    /// Get a device by id.
    fn get_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, FieldlinkError>> + Send;

    /// List every device.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, FieldlinkError>> + Send;

    /// Apply `f` to the stored device in place.
    ///
    /// Resolves to `None` when no device has this id.
    fn modify<F, T>(
        &self,
        id: &DeviceId,
        f: F,
    ) -> impl Future<Output = Result<Option<T>, FieldlinkError>> + Send
    where
        F: FnOnce(&mut Device) -> T + Send,
        T: Send;
}

impl<R: DeviceRepository + Send + Sync> DeviceRepository for Arc<R> {
    fn insert_if_absent(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<InsertOutcome, FieldlinkError>> + Send {
        (**self).insert_if_absent(device)
    }

    fn get_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, FieldlinkError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, FieldlinkError>> + Send {
        (**self).get_all()
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
        (**self).modify(id, f)
    }
}
