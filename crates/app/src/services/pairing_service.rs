//! Pairing service — device registration and data/alert ingestion.

use fieldlink_domain::device::Device;
use fieldlink_domain::error::{FieldlinkError, NotFoundError, ValidationError};
use fieldlink_domain::id::{DeviceId, ShopId};
use fieldlink_domain::submission::{Submission, SubmissionKind};
use fieldlink_domain::time;
use serde_json::Value;

use crate::ports::{DeviceRepository, InsertOutcome};

/// Result of a registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub shop_id: ShopId,
    /// `true` when this call created the device record.
    pub created: bool,
}

/// What a submission did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A sample was appended; carries the new sample count.
    SampleStored { sample_count: usize },
    /// An alert was raised and logged.
    AlertRaised,
    /// Only `last_seen` changed.
    Ignored,
}

/// Application service for the device pairing API.
pub struct PairingService<R> {
    repo: R,
}

impl<R: DeviceRepository> PairingService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a device, or report the shop it is already paired with.
    ///
    /// A repeat registration leaves the stored record untouched.
    ///
    /// # Errors
    ///
    /// Returns [`FieldlinkError::Validation`] when `device_id` is absent or
    /// empty, or a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn register(
        &self,
        device_id: Option<String>,
        device_type: Option<String>,
        version: Option<String>,
    ) -> Result<Registration, FieldlinkError> {
        let device_id = device_id
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::MissingField("deviceId"))?;

        let mut builder = Device::builder().device_id(DeviceId::new(device_id)?);
        if let Some(device_type) = device_type {
            builder = builder.device_type(device_type);
        }
        if let Some(version) = version {
            builder = builder.version(version);
        }
        let candidate = builder.build()?;

        let outcome = self.repo.insert_if_absent(candidate).await?;
        let created = matches!(outcome, InsertOutcome::Created(_));
        let device = outcome.device();
        if created {
            tracing::info!(
                device_id = %device.device_id,
                shop_id = %device.shop_id,
                "new device registered"
            );
        } else {
            tracing::info!(device_id = %device.device_id, "device checked in again");
        }
        Ok(Registration {
            shop_id: device.shop_id.clone(),
            created,
        })
    }

    /// Ingest a data or alert submission from a registered device.
    ///
    /// `last_seen` is updated whatever the submission kind.
    ///
    /// # Errors
    ///
    /// Returns [`FieldlinkError::NotFound`] when the device was never
    /// registered, or a storage error from the repository.
    #[tracing::instrument(skip(self, submission), fields(device_id = %submission.device_id))]
    pub async fn submit(&self, submission: Submission) -> Result<SubmitOutcome, FieldlinkError> {
        let Submission {
            device_id,
            shop_id,
            kind,
        } = submission;
        let now = time::now();

        let outcome = self
            .repo
            .modify(&device_id, move |device| {
                device.touch(now);
                match kind {
                    SubmissionKind::SensorData { data: Some(data) } => {
                        tracing::info!(
                            shop_id = %shop_id,
                            smoke = %field_or_undefined(&data, "smoke"),
                            temperature = %field_or_undefined(&data, "temperature"),
                            "received sensor data"
                        );
                        device.record_sample(data, now);
                        SubmitOutcome::SampleStored {
                            sample_count: device.samples.len(),
                        }
                    }
                    SubmissionKind::Alert {
                        alert_type: Some(alert_type),
                        message,
                    } => {
                        tracing::warn!(
                            shop_id = %shop_id,
                            device_id = %device.device_id,
                            alert_type = %alert_type,
                            message = message.as_deref().unwrap_or_default(),
                            "alarm received"
                        );
                        SubmitOutcome::AlertRaised
                    }
                    _ => SubmitOutcome::Ignored,
                }
            })
            .await?;

        outcome.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: device_id.to_string(),
            }
            .into()
        })
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`FieldlinkError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: &DeviceId) -> Result<Device, FieldlinkError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, FieldlinkError> {
        self.repo.get_all().await
    }
}

fn field_or_undefined(data: &serde_json::Map<String, Value>, key: &str) -> String {
    data.get(key)
        .map_or_else(|| "undefined".to_string(), Value::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    use serde_json::json;

    #[derive(Default)]
    struct InMemoryDeviceRepo {
        store: Mutex<HashMap<DeviceId, Device>>,
    }

    impl DeviceRepository for InMemoryDeviceRepo {
        fn insert_if_absent(
            &self,
            device: Device,
        ) -> impl Future<Output = Result<InsertOutcome, FieldlinkError>> + Send {
            let mut store = self.store.lock().unwrap();
            let outcome = match store.get(&device.device_id) {
                Some(existing) => InsertOutcome::Existing(existing.clone()),
                None => {
                    store.insert(device.device_id.clone(), device.clone());
                    InsertOutcome::Created(device)
                }
            };
            async { Ok(outcome) }
        }

        fn get_by_id(
            &self,
            id: &DeviceId,
        ) -> impl Future<Output = Result<Option<Device>, FieldlinkError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, FieldlinkError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Device> = store.values().cloned().collect();
            async { Ok(result) }
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
            let mut store = self.store.lock().unwrap();
            let result = store.get_mut(id).map(f);
            async { Ok(result) }
        }
    }

    fn make_service() -> PairingService<InMemoryDeviceRepo> {
        PairingService::new(InMemoryDeviceRepo::default())
    }

    fn sensor(device_id: &str, shop_id: &str, data: Value) -> Submission {
        let Value::Object(data) = data else {
            panic!("sensor data must be an object")
        };
        Submission::new(
            Some(device_id.to_string()),
            Some(shop_id.to_string()),
            SubmissionKind::SensorData { data: Some(data) },
        )
        .unwrap()
    }

    fn alert(device_id: &str, shop_id: &str) -> Submission {
        Submission::new(
            Some(device_id.to_string()),
            Some(shop_id.to_string()),
            SubmissionKind::Alert {
                alert_type: Some("FIRE".to_string()),
                message: Some("smoke above threshold".to_string()),
            },
        )
        .unwrap()
    }

    async fn register(svc: &PairingService<InMemoryDeviceRepo>, id: &str) -> Registration {
        svc.register(Some(id.to_string()), Some("ESP32".to_string()), None)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_device_on_first_registration() {
        let svc = make_service();
        let registration = register(&svc, "D1").await;
        assert!(registration.created);
        assert!(registration.shop_id.as_str().starts_with("SHOP-"));

        let device = svc
            .get_device(&DeviceId::new("D1").unwrap())
            .await
            .unwrap();
        assert_eq!(device.shop_id, registration.shop_id);
        assert_eq!(device.device_type.as_deref(), Some("ESP32"));
        assert!(device.samples.is_empty());
    }

    #[tokio::test]
    async fn should_return_same_shop_id_when_registered_twice() {
        let svc = make_service();
        let first = register(&svc, "D1").await;
        let second = svc
            .register(Some("D1".to_string()), Some("SIM900".to_string()), None)
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(first.shop_id, second.shop_id);

        let device = svc
            .get_device(&DeviceId::new("D1").unwrap())
            .await
            .unwrap();
        assert_eq!(device.device_type.as_deref(), Some("ESP32"));
    }

    #[tokio::test]
    async fn should_reject_registration_without_device_id() {
        let svc = make_service();
        for device_id in [None, Some(String::new())] {
            let result = svc.register(device_id, None, None).await;
            assert!(matches!(
                result,
                Err(FieldlinkError::Validation(ValidationError::MissingField(
                    "deviceId"
                )))
            ));
        }
        assert!(svc.list_devices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_submitting_for_unknown_device() {
        let svc = make_service();
        let result = svc.submit(sensor("ghost", "SHOP-1", json!({"smoke": 1}))).await;
        assert!(matches!(result, Err(FieldlinkError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_append_exactly_one_sample_for_sensor_data() {
        let svc = make_service();
        let reg = register(&svc, "D1").await;

        let outcome = svc
            .submit(sensor("D1", reg.shop_id.as_str(), json!({"smoke": 12, "temperature": 24.5})))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::SampleStored { sample_count: 1 });

        let device = svc
            .get_device(&DeviceId::new("D1").unwrap())
            .await
            .unwrap();
        assert_eq!(device.samples.len(), 1);
        assert_eq!(device.samples[0].fields["smoke"], json!(12));
    }

    #[tokio::test]
    async fn should_leave_samples_unchanged_for_alert() {
        let svc = make_service();
        let reg = register(&svc, "D1").await;
        svc.submit(sensor("D1", reg.shop_id.as_str(), json!({"smoke": 1})))
            .await
            .unwrap();

        let outcome = svc.submit(alert("D1", reg.shop_id.as_str())).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::AlertRaised);

        let device = svc
            .get_device(&DeviceId::new("D1").unwrap())
            .await
            .unwrap();
        assert_eq!(device.samples.len(), 1);
    }

    #[tokio::test]
    async fn should_accept_unknown_type_and_update_last_seen() {
        let svc = make_service();
        let reg = register(&svc, "D1").await;
        let id = DeviceId::new("D1").unwrap();
        let before = svc.get_device(&id).await.unwrap().last_seen;

        let submission = Submission::new(
            Some("D1".to_string()),
            Some(reg.shop_id.to_string()),
            SubmissionKind::Other(Some("heartbeat".to_string())),
        )
        .unwrap();
        let outcome = svc.submit(submission).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Ignored);

        let device = svc.get_device(&id).await.unwrap();
        assert!(device.last_seen >= before);
        assert!(device.samples.is_empty());
    }

    #[tokio::test]
    async fn should_ignore_sensor_data_without_payload() {
        let svc = make_service();
        let reg = register(&svc, "D1").await;
        let submission = Submission::new(
            Some("D1".to_string()),
            Some(reg.shop_id.to_string()),
            SubmissionKind::SensorData { data: None },
        )
        .unwrap();
        assert_eq!(svc.submit(submission).await.unwrap(), SubmitOutcome::Ignored);
    }

    #[tokio::test]
    async fn should_store_plain_text_sensor_data_as_sample() {
        let svc = make_service();
        let reg = register(&svc, "D1").await;
        let id = DeviceId::new("D1").unwrap();

        for data in [json!("smoke=3;temp=19"), json!(42), json!([1, 2])] {
            let before = svc.get_device(&id).await.unwrap().samples.len();
            let submission = Submission::new(
                Some("D1".to_string()),
                Some(reg.shop_id.to_string()),
                SubmissionKind::classify(Some("sensor_data"), Some(data), None, None),
            )
            .unwrap();
            let outcome = svc.submit(submission).await.unwrap();
            assert_eq!(
                outcome,
                SubmitOutcome::SampleStored {
                    sample_count: before + 1
                }
            );
        }

        let device = svc.get_device(&id).await.unwrap();
        assert_eq!(device.samples.len(), 3);
        assert_eq!(device.samples[0].fields["0"], json!("s"));
        assert!(device.samples[1].fields.is_empty());
        assert_eq!(device.samples[2].fields["1"], json!(2));
    }

    #[tokio::test]
    async fn should_ignore_alert_without_category() {
        let svc = make_service();
        let reg = register(&svc, "D1").await;
        for alert_type in [None, Some(String::new())] {
            let submission = Submission::new(
                Some("D1".to_string()),
                Some(reg.shop_id.to_string()),
                SubmissionKind::classify(
                    Some("alert"),
                    None,
                    alert_type,
                    Some("smoke detected".to_string()),
                ),
            )
            .unwrap();
            assert_eq!(svc.submit(submission).await.unwrap(), SubmitOutcome::Ignored);
        }
    }

    #[tokio::test]
    async fn should_list_all_devices() {
        let svc = make_service();
        register(&svc, "D1").await;
        register(&svc, "D2").await;
        register(&svc, "D1").await;
        assert_eq!(svc.list_devices().await.unwrap().len(), 2);
    }
}
