use super::{segment, ApiClient};
use crate::domain::{Vehicle, VehicleStatus, VehicleType};
use crate::forms::VehicleForm;
use crate::upload::Upload;
use eyre::Result;
use reqwest::Method;

/// Server side filters for the vehicle list.
#[derive(Debug, Clone, Default)]
pub struct VehicleQuery {
    pub status: Option<VehicleStatus>,
    pub kind: Option<VehicleType>,
    pub station_id: Option<String>,
}

impl VehicleQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(kind) = self.kind {
            pairs.push(("type", kind.to_string()));
        }
        if let Some(station_id) = &self.station_id {
            pairs.push(("stationId", station_id.clone()));
        }
        pairs
    }
}

fn image_part(image: Option<Upload>) -> Vec<(&'static str, Upload)> {
    image.map(|x| vec![("image", x)]).unwrap_or_default()
}

impl ApiClient {
    pub async fn list_vehicles(&self, query: &VehicleQuery) -> Result<Vec<Vehicle>> {
        self.get_list("/vehicles", &query.pairs()).await
    }

    pub async fn get_vehicle(&self, id: &str) -> Result<Vehicle> {
        self.get_one(&format!("/vehicles/{}", segment(id))).await
    }

    pub async fn create_vehicle(&self, vehicle: &VehicleForm, image: Option<Upload>) -> Result<Vehicle> {
        self.send_multipart(Method::POST, "/vehicles", vehicle, image_part(image))
            .await
    }

    pub async fn update_vehicle(
        &self,
        id: &str,
        vehicle: &VehicleForm,
        image: Option<Upload>,
    ) -> Result<Vehicle> {
        let path = format!("/vehicles/{}", segment(id));
        self.send_multipart(Method::PUT, &path, vehicle, image_part(image))
            .await
    }

    pub async fn delete_vehicle(&self, id: &str) -> Result<()> {
        let path = format!("/vehicles/{}", segment(id));
        self.send_unit::<()>(Method::DELETE, &path, None).await
    }
}
