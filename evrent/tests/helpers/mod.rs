#![allow(dead_code)]

use evrent_client::api_client::ApiClient;
use evrent_client::notify::{MemoryNotifier, Toast};
use evrent_client::screens::ScreenContext;
use evrent_client::settings::Settings;
use eyre::{eyre, Result};
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

/// A mocked backend plus client settings pointing at it. Session and tab
/// files live in a temp dir that is removed with the app.
pub struct TestApp {
    pub server: MockServer,
    pub settings: Settings,
    pub toasts: Arc<MemoryNotifier>,
    _dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        let server = MockServer::start().await;
        let dir = TempDir::new()?;
        let dir_path = dir.path();

        let settings: Settings = Settings::build_default()?
            .set_override("server_address", server.uri())?
            .set_override("api_base_url", "http://assets.test")?
            .set_override("session_path", dir_path.join("session").to_str())?
            .set_override("tab_path", dir_path.join("rental_tab").to_str())?
            .set_override("log_path", dir_path.join("evrent.log").to_str())?
            .build()?
            .try_deserialize()
            .map_err(|e| eyre!("Failed to deserialize {e}"))?;
        settings.save_session(TOKEN)?;

        Ok(Self {
            server,
            settings,
            toasts: Arc::new(MemoryNotifier::new()),
            _dir: dir,
        })
    }

    pub fn context(&self) -> Result<ScreenContext> {
        let api = ApiClient::from_settings(&self.settings)?;
        Ok(ScreenContext::new(
            api,
            self.toasts.clone(),
            self.settings.clone(),
        ))
    }

    pub fn last_toast(&self) -> Option<Toast> {
        self.toasts.last()
    }

    pub fn last_message(&self) -> Option<String> {
        self.last_toast().and_then(|x| x.description)
    }

    /// Requests the mock received with the given method.
    pub async fn requests(&self, method: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|x| x.method.to_string() == method)
            .collect()
    }
}

pub fn user_json(id: &str, role: &str) -> Value {
    let name: String = Name().fake();
    let email: String = FreeEmail().fake();
    json!({
        "_id": id,
        "fullName": name,
        "email": email,
        "phone": "0901234567",
        "role": role,
        "isActive": true,
        "verification": { "verified": false },
    })
}

pub fn renter_json(id: &str) -> Value {
    user_json(id, "renter")
}

pub fn vehicle_json(id: &str, kind: &str, price_per_hour: u64) -> Value {
    json!({
        "_id": id,
        "licensePlate": format!("51A-{}", &id[id.len().saturating_sub(3)..]),
        "brand": "VinFast",
        "model": "VF e34",
        "type": kind,
        "status": "available",
        "capacity": 5,
        "rangePerFullCharge": 300,
        "pricePerHour": price_per_hour,
        "stationId": "s1",
        "odo": 1200,
        "batteryLevel": 90,
    })
}

pub fn station_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "address": "1 Lê Lợi, Quận 1",
        "latitude": 10.776,
        "longitude": 106.700,
        "status": "active",
        "staff": [],
    })
}

pub fn reservation_json(id: &str, renter: Value, vehicle: Value, status: &str) -> Value {
    json!({
        "_id": id,
        "renter": renter,
        "vehicle": vehicle,
        "reservedStartTime": "2026-10-20T08:00:00Z",
        "reservedEndTime": "2026-10-20T12:00:00Z",
        "status": status,
        "insurance": 0,
    })
}

pub fn rental_json(id: &str, status: &str, deposit_status: &str) -> Value {
    json!({
        "_id": id,
        "renter": renter_json("r1"),
        "vehicle": vehicle_json("v1", "car", 100_000),
        "startTime": "2026-10-20T08:00:00Z",
        "status": status,
        "depositAmount": 5_000_000,
        "depositStatus": deposit_status,
        "odoStart": 1200,
        "rentalType": "booking",
    })
}
