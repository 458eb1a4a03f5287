/// Declares a status-like enum with its wire value and Vietnamese display label.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(format!("Unknown {} '{}'", stringify!($name), s)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

pub(crate) use wire_enum;

/// Declares a backend document. The id is read from `_id` or `id`; records
/// that carry both keys are accepted and `_id` wins.
macro_rules! entity {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident: $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub id: String,
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl crate::domain::reference::HasId for $name {
            fn id(&self) -> &str {
                &self.id
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                #[derive(serde::Deserialize)]
                #[serde(rename_all = "camelCase")]
                struct Wire {
                    #[serde(rename = "_id", default)]
                    object_id: Option<String>,
                    #[serde(default)]
                    id: Option<String>,
                    $(
                        $(#[$field_meta])*
                        $field: $ty,
                    )*
                }

                let wire = Wire::deserialize(deserializer)?;
                let id = wire
                    .object_id
                    .or(wire.id)
                    .ok_or_else(|| serde::de::Error::missing_field("_id"))?;
                Ok($name {
                    id,
                    $($field: wire.$field,)*
                })
            }
        }
    };
}

pub(crate) use entity;

pub(crate) fn default_true() -> bool {
    true
}

pub mod incident;
pub mod payment;
pub mod reference;
pub mod rental;
pub mod reservation;
pub mod station;
pub mod stats;
pub mod user;
pub mod vehicle;
pub mod violation;

pub use incident::{Incident, IncidentStatus, Severity};
pub use payment::{Bill, Payment, PaymentMethod, PaymentReceipt, PaymentStatus};
pub use reference::{HasId, Ref, Stub};
pub use rental::{DepositStatus, Rental, RentalStatus, RentalTab, RentalType};
pub use reservation::{Reservation, ReservationStatus};
pub use station::{Station, StationStatus};
pub use stats::SystemStats;
pub use user::{Role, User, Verification};
pub use vehicle::{Vehicle, VehicleStatus, VehicleType};
pub use violation::Violation;

#[cfg(test)]
mod tests {
    use super::*;
    use evrent_common::api::Listing;

    #[test]
    fn documents_with_both_id_keys_deserialize() {
        let body = r#"{"users":[
            {"_id":"u1","id":"u1","fullName":"An","email":"an@evrent.vn","role":"staff"},
            {"id":"u2","fullName":"Binh","email":"binh@evrent.vn","role":"renter"}
        ]}"#;
        let users = serde_json::from_str::<Listing<User>>(body).unwrap().into_vec();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, "u1");
        assert_eq!(users[1].id, "u2");
        assert!(users[0].is_active);
    }

    #[test]
    fn object_id_wins_when_keys_disagree() {
        let body = r#"{"_id":"mongo","id":"virtual","name":"Q1","status":"active"}"#;
        let station: Station = serde_json::from_str(body).unwrap();
        assert_eq!(station.id, "mongo");
    }

    #[test]
    fn document_without_id_is_rejected() {
        let body = r#"{"name":"Q1","status":"active"}"#;
        assert!(serde_json::from_str::<Station>(body).is_err());
    }

    #[test]
    fn vehicle_accepts_station_and_station_id_together() {
        let body = r#"[{"_id":"v1","id":"v1","licensePlate":"59A-1","brand":"VinFast",
            "model":"VF e34","type":"car","status":"available","pricePerHour":120000,
            "station":{"_id":"s1","name":"Q1","status":"active"},"stationId":"s1"},
            {"_id":"v2","licensePlate":"59B-2","brand":"VinFast","model":"Klara",
            "type":"motorbike","status":"rented","pricePerHour":30000,"stationId":"s2"}]"#;
        let vehicles = serde_json::from_str::<Listing<Vehicle>>(body).unwrap().into_vec();
        assert_eq!(vehicles[0].station_id(), Some("s1"));
        assert_eq!(vehicles[0].station_name(), Some("Q1"));
        assert_eq!(vehicles[1].station_id(), Some("s2"));
        assert_eq!(vehicles[1].station_name(), None);
    }

    #[test]
    fn rentals_with_projected_references_deserialize() {
        let body = r#"[{"_id":"r1",
            "renter":{"_id":"u1","fullName":"An","phone":"0900000000"},
            "vehicle":"v1","status":"booked"},
            {"_id":"r2","renter":"u2",
            "vehicle":{"_id":"v2","licensePlate":"59B-2","pricePerHour":30000},
            "status":"in_use"}]"#;
        let rentals = serde_json::from_str::<Listing<Rental>>(body).unwrap().into_vec();

        assert_eq!(rentals[0].renter.id(), "u1");
        assert!(rentals[0].renter.partial().is_some());
        assert_eq!(rentals[0].renter_name(), "An");
        assert_eq!(rentals[0].renter_phone(), Some("0900000000"));
        assert_eq!(rentals[0].vehicle_label(), "v1");
        assert_eq!(rentals[0].price_per_hour(), None);

        assert_eq!(rentals[1].renter_name(), "u2");
        assert_eq!(rentals[1].vehicle.id(), "v2");
        assert_eq!(rentals[1].vehicle_label(), "59B-2");
        assert_eq!(rentals[1].price_per_hour(), Some(30000));
    }

    #[test]
    fn fully_populated_reference_resolves() {
        let body = r#"{"_id":"r1","vehicle":"v1","status":"booked",
            "renter":{"_id":"u1","fullName":"An","email":"an@evrent.vn","role":"renter",
            "isHighRisk":true}}"#;
        let rental: Rental = serde_json::from_str(body).unwrap();
        assert_eq!(rental.renter.resolved().map(|x| x.email.as_str()), Some("an@evrent.vn"));
        assert!(rental.renter.is_high_risk());
    }
}
