use super::{segment, ApiClient};
use crate::domain::{Role, User};
use crate::forms::{CustomerUpdateForm, PersonnelForm};
use evrent_common::api::AssignStationRequest;
use eyre::Result;
use reqwest::Method;

impl ApiClient {
    /// Users filtered by role on the backend, or every user when `role` is `None`.
    pub async fn list_users(&self, role: Option<Role>) -> Result<Vec<User>> {
        let query: Vec<(&str, String)> = role
            .map(|x| vec![("role", x.as_str().to_string())])
            .unwrap_or_default();
        self.get_list("/users", &query).await
    }

    pub async fn create_user(&self, user: &PersonnelForm) -> Result<User> {
        self.send_json(Method::POST, "/users", user).await
    }

    pub async fn update_user(&self, id: &str, user: &CustomerUpdateForm) -> Result<User> {
        let path = format!("/users/{}", segment(id));
        self.send_json(Method::PUT, &path, user).await
    }

    /// Flips `isActive`. Users are never deleted, only locked.
    pub async fn toggle_user_status(&self, id: &str) -> Result<()> {
        let path = format!("/users/{}/toggle-status", segment(id));
        self.send_unit::<()>(Method::PATCH, &path, None).await
    }

    /// Marks the identity document of a renter as verified.
    pub async fn verify_user(&self, id: &str) -> Result<()> {
        let path = format!("/users/{}/verify", segment(id));
        self.send_unit::<()>(Method::PATCH, &path, None).await
    }

    pub async fn assign_station(&self, id: &str, station_id: &str) -> Result<()> {
        let path = format!("/users/{}/station", segment(id));
        let body = AssignStationRequest {
            station_id: station_id.into(),
        };
        self.send_unit(Method::PATCH, &path, Some(&body)).await
    }
}
