//! Staff side of the handover workflow: check-in, deposit, pickup, return,
//! bill, payment and violations.

use super::{segment, ApiClient};
use crate::domain::{Bill, PaymentMethod, PaymentReceipt, Rental, RentalStatus, Reservation, Violation};
use crate::forms::{PickupForm, ReturnForm, ViolationForm, WalkInForm};
use crate::upload::HandoverFiles;
use evrent_common::api::{CancelRequest, CheckInRequest, PaymentRequest};
use eyre::Result;
use reqwest::Method;

fn rental_path(id: &str, action: &str) -> String {
    format!("/staff/rentals/{}/{action}", segment(id))
}

impl ApiClient {
    pub async fn staff_reservations(&self) -> Result<Vec<Reservation>> {
        self.get_list("/staff/reservations", &[]).await
    }

    /// Turns a confirmed reservation into a rental with the deposit due.
    pub async fn check_in(&self, reservation_id: &str, deposit_amount: u64) -> Result<Rental> {
        let path = format!("/staff/reservations/{}/check-in", segment(reservation_id));
        self.send_json(Method::POST, &path, &CheckInRequest { deposit_amount })
            .await
    }

    pub async fn cancel_reservation_by_staff(&self, id: &str, reason: &str) -> Result<()> {
        let path = format!("/staff/reservations/{}/cancel", segment(id));
        let body = CancelRequest {
            reason: reason.into(),
        };
        self.send_unit(Method::PATCH, &path, Some(&body)).await
    }

    pub async fn staff_rentals(&self, status: Option<RentalStatus>) -> Result<Vec<Rental>> {
        let query: Vec<(&str, String)> = status
            .map(|x| vec![("status", x.to_string())])
            .unwrap_or_default();
        self.get_list("/staff/rentals", &query).await
    }

    pub async fn hold_deposit(&self, rental_id: &str) -> Result<()> {
        self.send_unit::<()>(Method::PATCH, &rental_path(rental_id, "deposit/hold"), None)
            .await
    }

    pub async fn confirm_pickup(
        &self,
        rental_id: &str,
        report: &PickupForm,
        files: HandoverFiles,
    ) -> Result<Rental> {
        let path = rental_path(rental_id, "pickup");
        self.send_multipart(Method::POST, &path, report, files.parts())
            .await
    }

    pub async fn confirm_return(
        &self,
        rental_id: &str,
        report: &ReturnForm,
        files: HandoverFiles,
    ) -> Result<Rental> {
        let path = rental_path(rental_id, "return");
        self.send_multipart(Method::POST, &path, report, files.parts())
            .await
    }

    pub async fn calculate_bill(&self, rental_id: &str) -> Result<Bill> {
        self.get_one(&rental_path(rental_id, "bill")).await
    }

    pub async fn process_payment(
        &self,
        rental_id: &str,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt> {
        let body = PaymentRequest {
            method: method.to_string(),
        };
        self.send_json(Method::POST, &rental_path(rental_id, "payment"), &body)
            .await
    }

    pub async fn add_violation(&self, rental_id: &str, violation: &ViolationForm) -> Result<Violation> {
        self.send_json(Method::POST, &rental_path(rental_id, "violations"), violation)
            .await
    }

    pub async fn list_violations(&self, rental_id: &str) -> Result<Vec<Violation>> {
        self.get_list(&rental_path(rental_id, "violations"), &[])
            .await
    }

    pub async fn create_walk_in_rental(&self, rental: &WalkInForm) -> Result<Rental> {
        self.send_json(Method::POST, "/staff/rentals/walk-in", rental)
            .await
    }
}
