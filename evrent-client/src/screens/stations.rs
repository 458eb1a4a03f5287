use super::{ScreenContext, Submit};
use crate::domain::{Station, StationStatus, User};
use crate::filter::{filter_stations, Choice};
use crate::forms::{check, StationForm};
use crate::messages;

pub struct StationsScreen {
    ctx: ScreenContext,
    pub stations: Vec<Station>,
    /// Staff of the station currently opened, if any.
    pub staff: Vec<User>,
    pub search: String,
    pub status: Choice<StationStatus>,
}

impl StationsScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            stations: Vec::new(),
            staff: Vec::new(),
            search: String::new(),
            status: Choice::All,
        }
    }

    pub async fn load(&mut self) {
        let action = self.ctx.api.list_stations();
        if let Some(stations) = self.ctx.fetch(action, messages::LOAD_STATIONS_FAILED).await {
            self.stations = stations;
        }
    }

    pub fn visible(&self) -> Vec<&Station> {
        filter_stations(&self.stations, &self.search, &self.status)
    }

    pub async fn load_staff(&mut self, station_id: &str) {
        let action = self.ctx.api.station_staff(station_id);
        if let Some(staff) = self.ctx.fetch(action, messages::LOAD_USERS_FAILED).await {
            self.staff = staff;
        }
    }

    pub async fn create(&mut self, form: &StationForm) -> Submit {
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.create_station(form);
        let saved = self
            .ctx
            .perform(action, messages::STATION_CREATED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.load().await;
        Submit::Done
    }

    pub async fn update(&mut self, id: &str, form: &StationForm) -> Submit {
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.update_station(id, form);
        let saved = self
            .ctx
            .perform(action, messages::STATION_UPDATED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.load().await;
        Submit::Done
    }
}
