#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemStats {
    pub total_vehicles: u64,
    pub available_vehicles: u64,
    pub rented_vehicles: u64,
    pub maintenance_vehicles: u64,
    pub total_stations: u64,
    pub active_rentals: u64,
    pub total_renters: u64,
    pub open_incidents: u64,
    pub revenue_today: u64,
}
