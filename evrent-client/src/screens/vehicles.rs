use super::{ScreenContext, Submit};
use crate::api_client::{asset_url, VehicleQuery};
use crate::domain::{Station, Vehicle, VehicleStatus, VehicleType};
use crate::filter::{filter_vehicles, Choice};
use crate::forms::{check, VehicleForm};
use crate::messages;
use crate::upload::Upload;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VehicleCounts {
    pub total: usize,
    pub available: usize,
    pub rented: usize,
    pub maintenance: usize,
    pub reserved: usize,
}

pub struct VehiclesScreen {
    ctx: ScreenContext,
    pub vehicles: Vec<Vehicle>,
    pub stations: Vec<Station>,
    pub search: String,
    pub status: Choice<VehicleStatus>,
    pub kind: Choice<VehicleType>,
    pub station: Choice<String>,
}

impl VehiclesScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            vehicles: Vec::new(),
            stations: Vec::new(),
            search: String::new(),
            status: Choice::All,
            kind: Choice::All,
            station: Choice::All,
        }
    }

    pub async fn load(&mut self) {
        let api = &self.ctx.api;
        let query = VehicleQuery::default();
        let action = async { tokio::try_join!(api.list_vehicles(&query), api.list_stations()) };
        if let Some((vehicles, stations)) =
            self.ctx.fetch(action, messages::LOAD_VEHICLES_FAILED).await
        {
            self.vehicles = vehicles;
            self.stations = stations;
        }
    }

    pub fn visible(&self) -> Vec<&Vehicle> {
        filter_vehicles(
            &self.vehicles,
            &self.search,
            &self.status,
            &self.kind,
            &self.station,
        )
    }

    pub fn find(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|x| x.id == id)
    }

    pub fn counts(&self) -> VehicleCounts {
        let count = |status: VehicleStatus| self.vehicles.iter().filter(|x| x.status == status).count();
        VehicleCounts {
            total: self.vehicles.len(),
            available: count(VehicleStatus::Available),
            rented: count(VehicleStatus::Rented),
            maintenance: count(VehicleStatus::Maintenance),
            reserved: count(VehicleStatus::Reserved),
        }
    }

    /// Station name for the table, falling back to the loaded station list when
    /// the vehicle only carries the id.
    pub fn station_name<'a>(&'a self, vehicle: &'a Vehicle) -> Option<&'a str> {
        vehicle.station_name().or_else(|| {
            let id = vehicle.station_id()?;
            self.stations
                .iter()
                .find(|x| x.id == id)
                .map(|x| x.name.as_str())
        })
    }

    pub fn image_url(&self, vehicle: &Vehicle) -> Option<String> {
        vehicle
            .image_url
            .as_deref()
            .map(|x| asset_url(&self.ctx.settings.api_base_url, x))
    }

    pub async fn create(&mut self, form: &VehicleForm, image: Option<Upload>) -> Submit {
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.create_vehicle(form, image);
        let saved = self
            .ctx
            .perform(action, messages::VEHICLE_CREATED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.load().await;
        Submit::Done
    }

    pub async fn update(&mut self, id: &str, form: &VehicleForm, image: Option<Upload>) -> Submit {
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.update_vehicle(id, form, image);
        let saved = self
            .ctx
            .perform(action, messages::VEHICLE_UPDATED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.load().await;
        Submit::Done
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        let action = self.ctx.api.delete_vehicle(id);
        let done = self
            .ctx
            .perform(action, messages::VEHICLE_DELETED, messages::GENERIC_ERROR)
            .await
            .is_some();
        if done {
            self.load().await;
        }
        done
    }
}
