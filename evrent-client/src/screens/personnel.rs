use super::{ScreenContext, Submit};
use crate::domain::{Station, User};
use crate::filter::{filter_personnel, Choice};
use crate::forms::{check, ensure_unique_email, CustomerUpdateForm, PersonnelForm};
use crate::messages;
use tracing::debug;

/// Staff and admin accounts with their station assignment.
pub struct PersonnelScreen {
    ctx: ScreenContext,
    /// Every account known to the backend. Used for the duplicate email check.
    pub users: Vec<User>,
    pub stations: Vec<Station>,
    pub search: String,
    pub status: Choice<bool>,
    pub station: Choice<String>,
}

impl PersonnelScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            users: Vec::new(),
            stations: Vec::new(),
            search: String::new(),
            status: Choice::All,
            station: Choice::All,
        }
    }

    pub async fn load(&mut self) {
        let api = &self.ctx.api;
        let action = async { tokio::try_join!(api.list_users(None), api.list_stations()) };
        if let Some((users, stations)) = self.ctx.fetch(action, messages::LOAD_USERS_FAILED).await
        {
            self.users = users;
            self.stations = stations;
        }
    }

    pub fn visible(&self) -> Vec<&User> {
        filter_personnel(&self.users, &self.search, &self.status, &self.station)
    }

    pub fn station_name(&self, id: &str) -> Option<&str> {
        self.stations
            .iter()
            .find(|x| x.id == id)
            .map(|x| x.name.as_str())
    }

    /// Creates an account. A duplicate email is caught locally and nothing is sent.
    pub async fn create(&mut self, form: &PersonnelForm) -> Submit {
        if let Err(err) = ensure_unique_email(&self.users, &form.email) {
            debug!("refusing duplicate email {}", form.email);
            self.ctx.reject(&err.message);
            return Submit::Rejected(vec![err]);
        }
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.create_user(form);
        let saved = self
            .ctx
            .perform(action, messages::USER_CREATED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.load().await;
        Submit::Done
    }

    pub async fn update(&mut self, id: &str, form: &CustomerUpdateForm) -> Submit {
        let others: Vec<User> = self.users.iter().filter(|x| x.id != id).cloned().collect();
        if let Err(err) = ensure_unique_email(&others, &form.email) {
            self.ctx.reject(&err.message);
            return Submit::Rejected(vec![err]);
        }
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.update_user(id, form);
        let saved = self
            .ctx
            .perform(action, messages::USER_UPDATED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.load().await;
        Submit::Done
    }

    pub async fn toggle_status(&mut self, id: &str) -> bool {
        let action = self.ctx.api.toggle_user_status(id);
        let done = self
            .ctx
            .perform(action, messages::STATUS_UPDATED, messages::GENERIC_ERROR)
            .await
            .is_some();
        if done {
            self.load().await;
        }
        done
    }

    pub async fn assign_station(&mut self, id: &str, station_id: &str) -> bool {
        let action = self.ctx.api.assign_station(id, station_id);
        let done = self
            .ctx
            .perform(action, messages::STATION_ASSIGNED, messages::GENERIC_ERROR)
            .await
            .is_some();
        if done {
            self.load().await;
        }
        done
    }
}
