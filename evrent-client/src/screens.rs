//! View state for every page of the console.
//!
//! A screen loads its lists, filters them locally and runs actions against the
//! backend. Every action reports through the injected [`Notifier`] and
//! re-fetches on success. Failures leave the loaded state untouched.

use crate::api_client::ApiClient;
use crate::forms::FieldError;
use crate::notify::{report_failure, Notifier, Toast};
use crate::settings::Settings;
use eyre::Result;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

pub mod customers;
pub mod monitoring;
pub mod payments;
pub mod personnel;
pub mod rental_management;
pub mod rentals;
pub mod reservations;
pub mod stations;
pub mod vehicles;

pub use customers::{CustomerStats, CustomersScreen};
pub use monitoring::{MonitoringScreen, StationAvailability};
pub use payments::PaymentsScreen;
pub use personnel::PersonnelScreen;
pub use rental_management::RentalManagementScreen;
pub use rentals::RentalsScreen;
pub use reservations::ReservationsScreen;
pub use stations::StationsScreen;
pub use vehicles::{VehicleCounts, VehiclesScreen};

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submit {
    Done,
    /// Blocked before anything was sent.
    Rejected(Vec<FieldError>),
    /// Sent, but the backend refused or could not be reached.
    Failed,
}

impl Submit {
    pub fn is_done(&self) -> bool {
        matches!(self, Submit::Done)
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            Submit::Rejected(v) => v,
            _ => &[],
        }
    }
}

/// Everything a screen needs from the outside world.
#[derive(Clone)]
pub struct ScreenContext {
    pub api: ApiClient,
    pub notifier: Arc<dyn Notifier>,
    pub settings: Settings,
}

impl ScreenContext {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>, settings: Settings) -> Self {
        Self {
            api,
            notifier,
            settings,
        }
    }

    pub fn success(&self, message: &str) {
        info!("{message}");
        self.notifier.notify(Toast::success(message));
    }

    pub fn failure(&self, err: &eyre::Report, fallback: &str) {
        report_failure(self.notifier.as_ref(), err, fallback);
    }

    pub fn reject(&self, message: &str) {
        self.notifier.notify(Toast::error(message));
    }

    /// Awaits a read. Failures are reported and turned into `None`.
    pub async fn fetch<T>(&self, action: impl Future<Output = Result<T>>, fallback: &str) -> Option<T> {
        match action.await {
            Ok(v) => Some(v),
            Err(err) => {
                self.failure(&err, fallback);
                None
            }
        }
    }

    /// Awaits a mutation and reports the outcome either way.
    pub async fn perform<T>(
        &self,
        action: impl Future<Output = Result<T>>,
        success: &str,
        fallback: &str,
    ) -> Option<T> {
        let value = self.fetch(action, fallback).await?;
        self.success(success);
        Some(value)
    }
}
