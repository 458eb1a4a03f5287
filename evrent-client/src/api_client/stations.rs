use super::{segment, ApiClient};
use crate::domain::{Station, User};
use crate::forms::StationForm;
use eyre::Result;
use reqwest::Method;

impl ApiClient {
    pub async fn list_stations(&self) -> Result<Vec<Station>> {
        self.get_list("/stations", &[]).await
    }

    pub async fn get_station(&self, id: &str) -> Result<Station> {
        self.get_one(&format!("/stations/{}", segment(id))).await
    }

    pub async fn create_station(&self, station: &StationForm) -> Result<Station> {
        self.send_json(Method::POST, "/stations", station).await
    }

    pub async fn update_station(&self, id: &str, station: &StationForm) -> Result<Station> {
        let path = format!("/stations/{}", segment(id));
        self.send_json(Method::PUT, &path, station).await
    }

    /// Staff assigned to a station.
    pub async fn station_staff(&self, id: &str) -> Result<Vec<User>> {
        let path = format!("/stations/{}/staff", segment(id));
        self.get_list(&path, &[]).await
    }
}
