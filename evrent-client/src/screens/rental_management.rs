//! Staff handover desk. Reservations are checked in, the deposit is collected,
//! the vehicle is handed over, received back, billed and paid.
//!
//! The backend owns every transition; this screen only sequences the calls and
//! reflects what comes back.

use super::{ScreenContext, Submit};
use crate::domain::{
    Bill, PaymentMethod, PaymentReceipt, Rental, RentalStatus, RentalTab, Reservation,
    Violation,
};
use crate::filter::matches_search;
use crate::forms::{check, FieldError, PickupForm, ReturnForm, ViolationForm, WalkInForm};
use crate::messages;
use crate::pricing::{billable_hours, calculate_rental_cost, deposit_due};
use crate::upload::HandoverFiles;
use time::OffsetDateTime;
use tracing::warn;

pub struct RentalManagementScreen {
    ctx: ScreenContext,
    pub tab: RentalTab,
    pub reservations: Vec<Reservation>,
    pub rentals: Vec<Rental>,
    pub violations: Vec<Violation>,
    pub bill: Option<Bill>,
    pub receipt: Option<PaymentReceipt>,
    pub search: String,
}

impl RentalManagementScreen {
    /// Opens on the tab selected during the previous run.
    pub fn new(ctx: ScreenContext) -> Self {
        let tab = ctx.settings.rental_tab();
        Self {
            ctx,
            tab,
            reservations: Vec::new(),
            rentals: Vec::new(),
            violations: Vec::new(),
            bill: None,
            receipt: None,
            search: String::new(),
        }
    }

    pub fn set_tab(&mut self, tab: RentalTab) {
        self.tab = tab;
        if let Err(err) = self.ctx.settings.save_rental_tab(tab) {
            warn!("{err:?}");
        }
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    pub async fn load(&mut self) {
        let api = &self.ctx.api;
        let action = async { tokio::try_join!(api.staff_reservations(), api.staff_rentals(None)) };
        if let Some((reservations, rentals)) =
            self.ctx.fetch(action, messages::LOAD_RENTALS_FAILED).await
        {
            self.reservations = reservations;
            self.rentals = rentals;
        }
    }

    /// Confirmed reservations waiting at the counter. Shown on the handover tab.
    pub fn pending_check_ins(&self) -> Vec<&Reservation> {
        self.reservations
            .iter()
            .filter(|x| x.awaiting_check_in())
            .filter(|x| {
                let vehicle = x.vehicle_label();
                matches_search(&self.search, &[x.id.as_str(), x.renter_name(), vehicle.as_str()])
            })
            .collect()
    }

    /// Rentals belonging to the selected tab.
    pub fn tab_rentals(&self) -> Vec<&Rental> {
        self.rentals
            .iter()
            .filter(|x| x.tab() == Some(self.tab))
            .filter(|x| {
                let vehicle = x.vehicle_label();
                let phone = x.renter_phone().unwrap_or_default();
                matches_search(&self.search, &[x.id.as_str(), x.renter_name(), phone, vehicle.as_str()])
            })
            .collect()
    }

    pub fn find_rental(&self, id: &str) -> Option<&Rental> {
        self.rentals.iter().find(|x| x.id == id)
    }

    pub fn find_reservation(&self, id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|x| x.id == id)
    }

    /// Deposit to collect at check-in, or `None` when the vehicle is not known.
    pub fn deposit_preview(&self, reservation: &Reservation) -> Option<u64> {
        let kind = reservation.vehicle.kind()?;
        let high_risk = reservation.renter.is_high_risk();
        Some(deposit_due(kind, &self.ctx.settings.deposit, high_risk))
    }

    /// Running cost of a rental up to its end time, or up to `now` while in use.
    pub fn cost_preview(&self, rental: &Rental, now: OffsetDateTime) -> Option<u64> {
        rental_cost_preview(rental, now)
    }

    /// Converts a reservation into a rental. Without an explicit amount the
    /// deposit preview is used.
    pub async fn check_in(&mut self, reservation_id: &str, deposit: Option<u64>) -> Option<Rental> {
        let deposit = deposit.or_else(|| {
            self.find_reservation(reservation_id)
                .and_then(|x| self.deposit_preview(x))
        });
        let Some(deposit) = deposit else {
            self.ctx.reject(messages::DEPOSIT_UNKNOWN);
            return None;
        };

        let action = self.ctx.api.check_in(reservation_id, deposit);
        let rental = self
            .ctx
            .perform(action, messages::CHECKED_IN, messages::GENERIC_ERROR)
            .await?;
        self.load().await;
        Some(rental)
    }

    pub async fn cancel_reservation(&mut self, reservation_id: &str, reason: &str) -> bool {
        let action = self.ctx.api.cancel_reservation_by_staff(reservation_id, reason);
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

    pub async fn hold_deposit(&mut self, rental_id: &str) -> bool {
        let action = self.ctx.api.hold_deposit(rental_id);
        let done = self
            .ctx
            .perform(action, messages::DEPOSIT_HELD, messages::GENERIC_ERROR)
            .await
            .is_some();
        if done {
            self.load().await;
        }
        done
    }

    /// Hands the vehicle over. Refused locally while the deposit of a loaded
    /// rental has not been collected.
    pub async fn confirm_pickup(
        &mut self,
        rental_id: &str,
        form: &PickupForm,
        files: HandoverFiles,
    ) -> Submit {
        if self
            .find_rental(rental_id)
            .is_some_and(|x| !x.deposit_held())
        {
            self.ctx.reject(messages::DEPOSIT_REQUIRED);
            return Submit::Rejected(vec![FieldError {
                field: "deposit".into(),
                message: messages::DEPOSIT_REQUIRED.into(),
            }]);
        }
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.confirm_pickup(rental_id, form, files);
        let saved = self
            .ctx
            .perform(action, messages::PICKUP_CONFIRMED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.set_tab(RentalTab::InUse);
        self.load().await;
        Submit::Done
    }

    /// Receives the vehicle back. The odometer is checked against the pickup
    /// reading when the rental is loaded.
    pub async fn confirm_return(
        &mut self,
        rental_id: &str,
        form: &ReturnForm,
        files: HandoverFiles,
    ) -> Submit {
        let mut form = form.clone();
        if form.pickup_odo.is_none() {
            form.pickup_odo = self.find_rental(rental_id).and_then(|x| x.odo_start);
        }
        if let Err(errors) = check(&form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.confirm_return(rental_id, &form, files);
        let saved = self
            .ctx
            .perform(action, messages::RETURN_CONFIRMED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.set_tab(RentalTab::Return);
        self.load().await;
        Submit::Done
    }

    pub async fn calculate_bill(&mut self, rental_id: &str) -> Option<Bill> {
        let action = self.ctx.api.calculate_bill(rental_id);
        let bill = self
            .ctx
            .perform(action, messages::BILL_READY, messages::BILL_FAILED)
            .await?;
        self.bill = Some(bill.clone());
        Some(bill)
    }

    pub async fn load_violations(&mut self, rental_id: &str) {
        let action = self.ctx.api.list_violations(rental_id);
        if let Some(violations) = self.ctx.fetch(action, messages::LOAD_VIOLATIONS_FAILED).await {
            self.violations = violations;
        }
    }

    pub async fn add_violation(&mut self, rental_id: &str, form: &ViolationForm) -> Submit {
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.add_violation(rental_id, form);
        let saved = self
            .ctx
            .perform(action, messages::VIOLATION_ADDED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.load_violations(rental_id).await;
        Submit::Done
    }

    pub async fn process_payment(
        &mut self,
        rental_id: &str,
        method: PaymentMethod,
    ) -> Option<PaymentReceipt> {
        let receipt = process_payment(&self.ctx, rental_id, method).await?;
        self.receipt = Some(receipt.clone());
        self.bill = None;
        self.load().await;
        Some(receipt)
    }

    pub async fn create_walk_in(&mut self, form: &WalkInForm) -> Submit {
        if let Err(errors) = check(form) {
            return Submit::Rejected(errors);
        }

        let action = self.ctx.api.create_walk_in_rental(form);
        let saved = self
            .ctx
            .perform(action, messages::WALK_IN_CREATED, messages::GENERIC_ERROR)
            .await;
        if saved.is_none() {
            return Submit::Failed;
        }

        self.set_tab(RentalTab::Handover);
        self.load().await;
        Submit::Done
    }
}

/// Shared by the staff desk and the payment screen. PayOS payments answer with
/// a checkout link instead of a settled receipt.
pub(crate) async fn process_payment(
    ctx: &ScreenContext,
    rental_id: &str,
    method: PaymentMethod,
) -> Option<PaymentReceipt> {
    let receipt = ctx
        .fetch(
            ctx.api.process_payment(rental_id, method),
            messages::PAYMENT_FAILED,
        )
        .await?;

    match receipt.checkout_url.as_deref() {
        Some(url) => ctx.success(&format!("{}: {url}", messages::PAYMENT_LINK)),
        None => ctx.success(messages::PAYMENT_DONE),
    }
    Some(receipt)
}

/// Preview of what a rental costs so far. Uses the backend figure once it is known.
pub fn rental_cost_preview(rental: &Rental, now: OffsetDateTime) -> Option<u64> {
    if let Some(cost) = rental.rental_cost {
        return Some(cost);
    }

    let start = rental.start_time?;
    let end = match rental.status {
        RentalStatus::InUse => now,
        _ => rental.end_time.unwrap_or(now),
    };
    let price = rental.price_per_hour()?;
    Some(calculate_rental_cost(billable_hours(start, end), price))
}
