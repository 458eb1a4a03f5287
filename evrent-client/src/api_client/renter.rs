use super::{segment, ApiClient};
use crate::domain::{Rental, Reservation};
use crate::forms::ReservationForm;
use evrent_common::api::CancelRequest;
use eyre::Result;
use reqwest::Method;

impl ApiClient {
    pub async fn my_reservations(&self) -> Result<Vec<Reservation>> {
        self.get_list("/renter/reservations", &[]).await
    }

    pub async fn create_reservation(&self, reservation: &ReservationForm) -> Result<Reservation> {
        self.send_json(Method::POST, "/renter/reservations", reservation)
            .await
    }

    pub async fn cancel_reservation(&self, id: &str, reason: &str) -> Result<()> {
        let path = format!("/renter/reservations/{}/cancel", segment(id));
        let body = CancelRequest {
            reason: reason.into(),
        };
        self.send_unit(Method::PATCH, &path, Some(&body)).await
    }

    pub async fn my_rentals(&self) -> Result<Vec<Rental>> {
        self.get_list("/renter/rentals", &[]).await
    }

    pub async fn get_my_rental(&self, id: &str) -> Result<Rental> {
        self.get_one(&format!("/renter/rentals/{}", segment(id)))
            .await
    }
}
