//! Device — a paired field module (SIM900, ESP32, …) and its telemetry history.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FieldlinkError, ValidationError};
use crate::id::{DeviceId, ShopId};
use crate::time::{self, Timestamp};

/// A registered device.
///
/// `shop_id` is assigned once at first registration and never changes.
/// `samples` grows without bound for the lifetime of the process.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: DeviceId,
    pub device_type: Option<String>,
    pub version: Option<String>,
    pub shop_id: ShopId,
    pub registered_at: Timestamp,
    pub last_seen: Timestamp,
    pub samples: Vec<Sample>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Mark the device as seen at `at`.
    pub fn touch(&mut self, at: Timestamp) {
        self.last_seen = at;
    }

    /// Append a sensor reading captured at `at`.
    pub fn record_sample(&mut self, fields: Map<String, Value>, at: Timestamp) {
        self.samples.push(Sample::new(fields, at));
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    device_id: Option<DeviceId>,
    device_type: Option<String>,
    version: Option<String>,
    shop_id: Option<ShopId>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn shop_id(mut self, shop_id: ShopId) -> Self {
        self.shop_id = Some(shop_id);
        self
    }

    /// Consume the builder and return a [`Device`] with no samples.
    ///
    /// A random [`ShopId`] is drawn when none was provided.
    ///
    /// # Errors
    ///
    /// Returns [`FieldlinkError::Validation`] if `device_id` is missing.
    pub fn build(self) -> Result<Device, FieldlinkError> {
        let device_id = self
            .device_id
            .ok_or(ValidationError::MissingField("deviceId"))?;
        let registered_at = time::now();
        Ok(Device {
            device_id,
            device_type: self.device_type,
            version: self.version,
            shop_id: self.shop_id.unwrap_or_else(ShopId::random),
            registered_at,
            last_seen: registered_at,
            samples: Vec::new(),
        })
    }
}

/// A single telemetry reading: free-form fields plus the capture time.
///
/// Serialized flat, `{"timestamp": "...", "smoke": 12, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Sample {
    /// Build a sample. A `timestamp` key in `fields` is dropped in favour of
    /// the capture time.
    #[must_use]
    pub fn new(mut fields: Map<String, Value>, timestamp: Timestamp) -> Self {
        fields.remove("timestamp");
        Self { timestamp, fields }
    }
}
