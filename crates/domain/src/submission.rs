//! Submission — a data or alert report sent by a paired device.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::id::{DeviceId, ShopId};

/// Wire value of `type` for sensor readings.
pub const SENSOR_DATA: &str = "sensor_data";
/// Wire value of `type` for alerts.
pub const ALERT: &str = "alert";

/// What a submission carries.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionKind {
    /// `type == "sensor_data"`. Stored only when `data` is truthy.
    SensorData { data: Option<Map<String, Value>> },
    /// `type == "alert"`. Logged only when `alert_type` is non-empty.
    Alert {
        alert_type: Option<String>,
        message: Option<String>,
    },
    /// Any other (or missing) `type`; accepted and ignored.
    Other(Option<String>),
}

impl SubmissionKind {
    /// Classify a submission from its loosely-typed wire fields.
    ///
    /// `data` becomes a field set through [`sample_fields`]; an empty
    /// `alert_type` counts as absent.
    #[must_use]
    pub fn classify(
        kind: Option<&str>,
        data: Option<Value>,
        alert_type: Option<String>,
        message: Option<String>,
    ) -> Self {
        match kind {
            Some(SENSOR_DATA) => Self::SensorData {
                data: data.and_then(sample_fields),
            },
            Some(ALERT) => Self::Alert {
                alert_type: alert_type.filter(|category| !category.is_empty()),
                message,
            },
            other => Self::Other(other.map(str::to_string)),
        }
    }
}

/// Whether a loosely-typed device value counts as set.
///
/// `null`, `false`, zero and the empty string are unset. Arrays and objects
/// are always set, even when empty.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Turn a sensor `data` value into sample fields.
///
/// Objects keep their keys. Arrays are keyed by index, strings by character
/// index. Other truthy scalars give an empty field set. Unset values give
/// `None`.
#[must_use]
pub fn sample_fields(data: Value) -> Option<Map<String, Value>> {
    if !is_truthy(&data) {
        return None;
    }
    Some(match data {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        Value::String(text) => text
            .chars()
            .enumerate()
            .map(|(index, ch)| (index.to_string(), Value::String(ch.to_string())))
            .collect(),
        _ => Map::new(),
    })
}

/// A validated submission from a device.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub device_id: DeviceId,
    pub shop_id: ShopId,
    pub kind: SubmissionKind,
}

impl Submission {
    /// Validate the presence of both identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingAnyOf`] when either id is absent or empty.
    pub fn new(
        device_id: Option<String>,
        shop_id: Option<String>,
        kind: SubmissionKind,
    ) -> Result<Self, ValidationError> {
        const REQUIRED: &[&str] = &["deviceId", "shopId"];

        let device_id = device_id
            .and_then(|id| DeviceId::new(id).ok())
            .ok_or(ValidationError::MissingAnyOf(REQUIRED))?;
        let shop_id = shop_id
            .and_then(|id| ShopId::new(id).ok())
            .ok_or(ValidationError::MissingAnyOf(REQUIRED))?;
        Ok(Self {
            device_id,
            shop_id,
            kind,
        })
    }
}
