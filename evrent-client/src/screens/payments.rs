use super::rental_management::process_payment;
use super::ScreenContext;
use crate::domain::{Bill, Payment, PaymentMethod, PaymentReceipt, PaymentStatus, Rental, RentalStatus};
use crate::filter::{matches_search, Choice};
use crate::messages;

/// Rentals that reached the counter for settlement, shown as payments.
pub struct PaymentsScreen {
    ctx: ScreenContext,
    pub rentals: Vec<Rental>,
    pub bill: Option<Bill>,
    pub search: String,
    pub status: Choice<PaymentStatus>,
}

impl PaymentsScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            rentals: Vec::new(),
            bill: None,
            search: String::new(),
            status: Choice::All,
        }
    }

    pub async fn load(&mut self) {
        let action = self.ctx.api.staff_rentals(None);
        if let Some(rentals) = self.ctx.fetch(action, messages::LOAD_RENTALS_FAILED).await {
            self.rentals = rentals
                .into_iter()
                .filter(|x| {
                    matches!(
                        x.status,
                        RentalStatus::WaitingForPayment | RentalStatus::Returned
                    )
                })
                .collect();
        }
    }

    pub fn payments(&self) -> Vec<Payment> {
        self.rentals.iter().map(Payment::from_rental).collect()
    }

    pub fn visible(&self) -> Vec<Payment> {
        self.payments()
            .into_iter()
            .filter(|x| {
                matches_search(
                    &self.search,
                    &[
                        x.rental_id.as_str(),
                        x.renter_name.as_str(),
                        x.vehicle_label.as_str(),
                    ],
                )
            })
            .filter(|x| self.status.accepts(&x.status))
            .collect()
    }

    /// Sum of everything still waiting to be paid.
    pub fn outstanding(&self) -> u64 {
        self.payments()
            .iter()
            .filter(|x| x.status == PaymentStatus::Pending)
            .map(|x| x.amount)
            .sum()
    }

    pub async fn load_bill(&mut self, rental_id: &str) -> Option<Bill> {
        let action = self.ctx.api.calculate_bill(rental_id);
        let bill = self.ctx.fetch(action, messages::BILL_FAILED).await?;
        self.bill = Some(bill.clone());
        Some(bill)
    }

    pub async fn pay(&mut self, rental_id: &str, method: PaymentMethod) -> Option<PaymentReceipt> {
        let receipt = process_payment(&self.ctx, rental_id, method).await?;
        self.bill = None;
        self.load().await;
        Some(receipt)
    }
}
