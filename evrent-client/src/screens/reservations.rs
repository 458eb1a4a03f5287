use super::{ScreenContext, Submit};
use crate::api_client::VehicleQuery;
use crate::domain::{Reservation, ReservationStatus, Vehicle, VehicleStatus};
use crate::filter::{filter_reservations, Choice};
use crate::forms::{check, ReservationForm};
use crate::messages;
use crate::pricing::{quote, Quote};

/// A renter's own reservations and the vehicles open for booking.
pub struct ReservationsScreen {
    ctx: ScreenContext,
    pub reservations: Vec<Reservation>,
    pub vehicles: Vec<Vehicle>,
    pub search: String,
    pub status: Choice<ReservationStatus>,
}

impl ReservationsScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            reservations: Vec::new(),
            vehicles: Vec::new(),
            search: String::new(),
            status: Choice::All,
        }
    }

    pub async fn load(&mut self) {
        let api = &self.ctx.api;
        let query = VehicleQuery {
            status: Some(VehicleStatus::Available),
            ..Default::default()
        };
        let action = async { tokio::try_join!(api.my_reservations(), api.list_vehicles(&query)) };
        if let Some((reservations, vehicles)) =
            self.ctx.fetch(action, messages::LOAD_RESERVATIONS_FAILED).await
        {
            self.reservations = reservations;
            self.vehicles = vehicles;
        }
    }

    pub fn visible(&self) -> Vec<&Reservation> {
        filter_reservations(&self.reservations, &self.search, &self.status)
    }

    /// Price preview for the form. `None` until the vehicle is one of the loaded ones.
    pub fn quote(&self, form: &ReservationForm) -> Option<Quote> {
        let vehicle = self.vehicles.iter().find(|x| x.id == form.vehicle_id)?;
        Some(quote(
            form.reserved_start_time,
            form.reserved_end_time,
            vehicle.price_per_hour,
            form.insurance,
        ))
    }

    pub async fn create(&mut self, form: &ReservationForm) -> Submit {
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.create_reservation(form);
        let saved = self
            .ctx
            .perform(action, messages::RESERVATION_CREATED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.load().await;
        Submit::Done
    }

    pub async fn cancel(&mut self, id: &str, reason: &str) -> bool {
        if self
            .reservations
            .iter()
            .any(|x| x.id == id && !x.cancellable())
        {
            self.ctx.reject(messages::NOT_CANCELLABLE);
            return false;
        }

        let action = self.ctx.api.cancel_reservation(id, reason);
        let done = self
            .ctx
            .perform(action, messages::RESERVATION_CANCELLED, messages::GENERIC_ERROR)
            .await
            .is_some();
        if done {
            self.load().await;
        }
        done
    }
}
