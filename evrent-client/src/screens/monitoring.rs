use super::{ScreenContext, Submit};
use crate::api_client::VehicleQuery;
use crate::domain::{
    Incident, IncidentStatus, Severity, Station, SystemStats, Vehicle, VehicleStatus,
};
use crate::filter::{filter_incidents, Choice};
use crate::forms::{check, IncidentForm};
use crate::messages;

/// Vehicles parked at a station, by status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationAvailability {
    pub station_id: String,
    pub name: String,
    pub total: usize,
    pub available: usize,
    pub rented: usize,
    pub maintenance: usize,
}

/// System overview for admins: fleet, stations and open incidents.
pub struct MonitoringScreen {
    ctx: ScreenContext,
    pub stations: Vec<Station>,
    pub vehicles: Vec<Vehicle>,
    pub stats: SystemStats,
    pub incidents: Vec<Incident>,
    pub search: String,
    pub severity: Choice<Severity>,
    pub status: Choice<IncidentStatus>,
}

impl MonitoringScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            stations: Vec::new(),
            vehicles: Vec::new(),
            stats: SystemStats::default(),
            incidents: Vec::new(),
            search: String::new(),
            severity: Choice::All,
            status: Choice::All,
        }
    }

    /// Fetches everything at once and only renders when all requests succeed.
    pub async fn load(&mut self) {
        let api = &self.ctx.api;
        let query = VehicleQuery::default();
        let action = async {
            tokio::try_join!(
                api.list_stations(),
                api.list_vehicles(&query),
                api.overview_stats(),
                api.list_incidents(),
            )
        };

        if let Some((stations, vehicles, stats, incidents)) =
            self.ctx.fetch(action, messages::LOAD_MONITORING_FAILED).await
        {
            self.stations = stations;
            self.vehicles = vehicles;
            self.stats = stats;
            self.incidents = incidents;
        }
    }

    pub async fn load_incidents(&mut self) {
        let action = self.ctx.api.list_incidents();
        if let Some(incidents) = self.ctx.fetch(action, messages::LOAD_INCIDENTS_FAILED).await {
            self.incidents = incidents;
        }
    }

    pub fn visible_incidents(&self) -> Vec<&Incident> {
        filter_incidents(&self.incidents, &self.search, &self.severity, &self.status)
    }

    pub fn availability(&self) -> Vec<StationAvailability> {
        self.stations
            .iter()
            .map(|station| {
                let parked: Vec<&Vehicle> = self
                    .vehicles
                    .iter()
                    .filter(|x| x.station_id() == Some(station.id.as_str()))
                    .collect();
                let count = |status: VehicleStatus| parked.iter().filter(|x| x.status == status).count();

                StationAvailability {
                    station_id: station.id.clone(),
                    name: station.name.clone(),
                    total: parked.len(),
                    available: count(VehicleStatus::Available),
                    rented: count(VehicleStatus::Rented),
                    maintenance: count(VehicleStatus::Maintenance),
                }
            })
            .collect()
    }

    pub async fn update_incident(&mut self, id: &str, status: IncidentStatus) -> bool {
        let action = self.ctx.api.update_incident_status(id, status);
        let done = self
            .ctx
            .perform(action, messages::INCIDENT_UPDATED, messages::GENERIC_ERROR)
            .await
            .is_some();
        if done {
            self.load_incidents().await;
        }
        done
    }

    pub async fn report_incident(&mut self, form: &IncidentForm) -> Submit {
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.report_incident(form);
        let saved = self
            .ctx
            .perform(action, messages::INCIDENT_REPORTED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.load_incidents().await;
        Submit::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::ApiClient;
    use crate::notify::MemoryNotifier;
    use crate::settings::Settings;
    use serde_json::json;
    use std::sync::Arc;

    fn screen() -> MonitoringScreen {
        let settings: Settings = Settings::build_default()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        let api = ApiClient::new("http://127.0.0.1:9", None).unwrap();
        MonitoringScreen::new(ScreenContext::new(
            api,
            Arc::new(MemoryNotifier::new()),
            settings,
        ))
    }

    fn vehicle(id: &str, station: &str, status: &str) -> Vehicle {
        serde_json::from_value(json!({
            "_id": id,
            "licensePlate": id,
            "brand": "VinFast",
            "model": "Feliz",
            "type": "motorbike",
            "status": status,
            "pricePerHour": 30_000,
            "stationId": station,
        }))
        .unwrap()
    }

    #[test]
    fn availability_counts_vehicles_per_station() {
        let mut screen = screen();
        screen.stations = serde_json::from_value(json!([
            { "_id": "s1", "name": "Quận 1", "status": "active" },
            { "_id": "s2", "name": "Thủ Đức", "status": "maintenance" },
        ]))
        .unwrap();
        screen.vehicles = vec![
            vehicle("a", "s1", "available"),
            vehicle("b", "s1", "rented"),
            vehicle("c", "s1", "available"),
            vehicle("d", "s2", "maintenance"),
            vehicle("e", "s9", "available"),
        ];

        let availability = screen.availability();
        assert_eq!(availability.len(), 2);
        assert_eq!(
            availability[0],
            StationAvailability {
                station_id: "s1".into(),
                name: "Quận 1".into(),
                total: 3,
                available: 2,
                rented: 1,
                maintenance: 0,
            }
        );
        assert_eq!(availability[1].total, 1);
        assert_eq!(availability[1].maintenance, 1);
    }
}
