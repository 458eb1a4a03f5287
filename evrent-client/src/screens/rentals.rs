use super::rental_management::rental_cost_preview;
use super::ScreenContext;
use crate::domain::{Rental, RentalStatus};
use crate::filter::{filter_rentals, Choice};
use crate::messages;
use time::OffsetDateTime;

/// Rental history of the signed-in renter.
pub struct RentalsScreen {
    ctx: ScreenContext,
    pub rentals: Vec<Rental>,
    pub selected: Option<Rental>,
    pub search: String,
    pub status: Choice<RentalStatus>,
}

impl RentalsScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            rentals: Vec::new(),
            selected: None,
            search: String::new(),
            status: Choice::All,
        }
    }

    pub async fn load(&mut self) {
        let action = self.ctx.api.my_rentals();
        if let Some(rentals) = self.ctx.fetch(action, messages::LOAD_RENTALS_FAILED).await {
            self.rentals = rentals;
        }
    }

    pub fn visible(&self) -> Vec<&Rental> {
        filter_rentals(&self.rentals, &self.search, &self.status)
    }

    pub async fn open(&mut self, id: &str) -> Option<&Rental> {
        let action = self.ctx.api.get_my_rental(id);
        let rental = self.ctx.fetch(action, messages::LOAD_RENTAL_FAILED).await?;
        self.selected = Some(rental);
        self.selected.as_ref()
    }

    pub fn cost_preview(&self, rental: &Rental, now: OffsetDateTime) -> Option<u64> {
        rental_cost_preview(rental, now)
    }
}
