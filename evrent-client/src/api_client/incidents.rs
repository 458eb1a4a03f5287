use super::{segment, ApiClient};
use crate::domain::{Incident, IncidentStatus};
use crate::forms::IncidentForm;
use evrent_common::api::StatusUpdateRequest;
use eyre::Result;
use reqwest::Method;

impl ApiClient {
    pub async fn list_incidents(&self) -> Result<Vec<Incident>> {
        self.get_list("/incidents", &[]).await
    }

    pub async fn report_incident(&self, incident: &IncidentForm) -> Result<Incident> {
        self.send_json(Method::POST, "/incidents", incident).await
    }

    pub async fn update_incident_status(&self, id: &str, status: IncidentStatus) -> Result<Incident> {
        let path = format!("/incidents/{}", segment(id));
        let body = StatusUpdateRequest {
            status: status.to_string(),
        };
        self.send_json(Method::PATCH, &path, &body).await
    }
}
