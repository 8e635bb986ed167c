//! Identifier newtypes.
//!
//! Device identifiers are chosen by the devices themselves (IMEI, MAC, a
//! firmware-baked serial…), so they are opaque non-empty strings. Shop
//! identifiers are assigned by the server on first registration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_string_id {
    ($(#[doc = $doc:expr])* $name:ident, $field:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw value, rejecting empty strings.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::MissingField`] when `value` is empty.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(ValidationError::MissingField($field));
                }
                Ok(Self(value))
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

define_string_id!(
    /// Identifier a device reports for itself.
    DeviceId,
    "deviceId"
);

define_string_id!(
    /// Site identifier assigned to a device at first registration.
    ShopId,
    "shopId"
);

/// Prefix of every generated [`ShopId`].
pub const SHOP_ID_PREFIX: &str = "SHOP-";

/// Upper bound (exclusive) of the numeric suffix of a generated [`ShopId`].
pub const SHOP_ID_RANGE: u128 = 1000;

impl ShopId {
    /// Draw a fresh `SHOP-<n>` identifier with `n` in `0..1000`.
    ///
    /// Collisions between devices are possible and are not detected.
    #[must_use]
    pub fn random() -> Self {
        let n = uuid::Uuid::new_v4().as_u128() % SHOP_ID_RANGE;
        Self(format!("{SHOP_ID_PREFIX}{n}"))
    }
}

/// Identifier of a request log entry: wall-clock milliseconds at capture.
///
/// Two requests landing in the same millisecond share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(i64);

impl RequestId {
    /// Derive the identifier from a capture timestamp.
    #[must_use]
    pub fn from_timestamp(ts: crate::time::Timestamp) -> Self {
        Self(ts.timestamp_millis())
    }

    /// Access the raw millisecond value.
    #[must_use]
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
