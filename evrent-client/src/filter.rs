//! Client side search and filtering over already loaded lists.

use crate::domain::{
    Incident, IncidentStatus, Rental, RentalStatus, Reservation, ReservationStatus, Role, Severity,
    Station, StationStatus, User, Vehicle, VehicleStatus, VehicleType,
};
use std::str::FromStr;

/// True when the trimmed `search` is a case-insensitive substring of any of the
/// haystacks. A blank search matches everything.
///
/// Whitespace around the search box text is ignored on purpose, so `" an "`
/// finds the same users as `"an"`.
pub fn matches_search(search: &str, haystacks: &[&str]) -> bool {
    let search = search.trim();
    if search.is_empty() {
        return true;
    }

    let needle = search.to_lowercase();
    haystacks.iter().any(|x| x.to_lowercase().contains(&needle))
}

/// Value of a dropdown filter. `All` never rejects anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(v) => v == value,
        }
    }
}

impl<T: Clone + PartialEq> Choice<T> {
    /// Moves to the next option: all, then each option in order, then back to all.
    pub fn cycle(&self, options: &[T]) -> Self {
        match self {
            Choice::All => options.first().cloned().map_or(Choice::All, Choice::Only),
            Choice::Only(current) => {
                let next = options
                    .iter()
                    .position(|x| x == current)
                    .and_then(|i| options.get(i + 1));
                next.cloned().map_or(Choice::All, Choice::Only)
            }
        }
    }
}

impl<T: std::fmt::Display> Choice<T> {
    pub fn label(&self) -> String {
        match self {
            Choice::All => "all".into(),
            Choice::Only(v) => v.to_string(),
        }
    }
}

impl<T: FromStr> FromStr for Choice<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Choice::All),
            v => Ok(Choice::Only(T::from_str(v)?)),
        }
    }
}

pub fn filter_customers<'a>(
    users: &'a [User],
    search: &str,
    verified: &Choice<bool>,
    active: &Choice<bool>,
) -> Vec<&'a User> {
    users
        .iter()
        .filter(|x| {
            matches_search(
                search,
                &[x.full_name.as_str(), x.phone.as_str(), x.email.as_str()],
            )
        })
        .filter(|x| verified.accepts(&x.is_verified()))
        .filter(|x| active.accepts(&x.is_active))
        .collect()
}

pub fn filter_personnel<'a>(
    users: &'a [User],
    search: &str,
    active: &Choice<bool>,
    station: &Choice<String>,
) -> Vec<&'a User> {
    users
        .iter()
        .filter(|x| x.role != Role::Renter)
        .filter(|x| {
            matches_search(
                search,
                &[x.full_name.as_str(), x.phone.as_str(), x.email.as_str()],
            )
        })
        .filter(|x| active.accepts(&x.is_active))
        .filter(|x| match station {
            Choice::All => true,
            Choice::Only(id) => x.station_id.as_deref() == Some(id.as_str()),
        })
        .collect()
}

pub fn filter_vehicles<'a>(
    vehicles: &'a [Vehicle],
    search: &str,
    status: &Choice<VehicleStatus>,
    kind: &Choice<VehicleType>,
    station: &Choice<String>,
) -> Vec<&'a Vehicle> {
    vehicles
        .iter()
        .filter(|x| {
            matches_search(
                search,
                &[x.license_plate.as_str(), x.brand.as_str(), x.model.as_str()],
            )
        })
        .filter(|x| status.accepts(&x.status))
        .filter(|x| kind.accepts(&x.kind))
        .filter(|x| match station {
            Choice::All => true,
            Choice::Only(id) => x.station_id() == Some(id.as_str()),
        })
        .collect()
}

pub fn filter_stations<'a>(
    stations: &'a [Station],
    search: &str,
    status: &Choice<StationStatus>,
) -> Vec<&'a Station> {
    stations
        .iter()
        .filter(|x| matches_search(search, &[x.name.as_str(), x.address.as_str()]))
        .filter(|x| status.accepts(&x.status))
        .collect()
}

pub fn filter_rentals<'a>(
    rentals: &'a [Rental],
    search: &str,
    status: &Choice<RentalStatus>,
) -> Vec<&'a Rental> {
    rentals
        .iter()
        .filter(|x| {
            let vehicle = x.vehicle_label();
            let phone = x.renter_phone().unwrap_or_default();
            matches_search(search, &[x.id.as_str(), x.renter_name(), phone, vehicle.as_str()])
        })
        .filter(|x| status.accepts(&x.status))
        .collect()
}

pub fn filter_reservations<'a>(
    reservations: &'a [Reservation],
    search: &str,
    status: &Choice<ReservationStatus>,
) -> Vec<&'a Reservation> {
    reservations
        .iter()
        .filter(|x| {
            let vehicle = x.vehicle_label();
            matches_search(search, &[x.id.as_str(), x.renter_name(), vehicle.as_str()])
        })
        .filter(|x| status.accepts(&x.status))
        .collect()
}

pub fn filter_incidents<'a>(
    incidents: &'a [Incident],
    search: &str,
    severity: &Choice<Severity>,
    status: &Choice<IncidentStatus>,
) -> Vec<&'a Incident> {
    incidents
        .iter()
        .filter(|x| matches_search(search, &[x.description.as_str()]))
        .filter(|x| severity.accepts(&x.severity))
        .filter(|x| status.accepts(&x.status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_walks_every_option_then_returns_to_all() {
        let mut choice = Choice::All;
        let mut seen = Vec::new();
        for _ in 0..VehicleStatus::ALL.len() {
            choice = choice.cycle(VehicleStatus::ALL);
            seen.push(choice.clone());
        }
        assert_eq!(seen.first(), Some(&Choice::Only(VehicleStatus::Available)));
        assert_eq!(choice.cycle(VehicleStatus::ALL), Choice::All);
    }

    #[test]
    fn parses_all_as_no_filter() {
        assert_eq!(Choice::<VehicleStatus>::from_str("all"), Ok(Choice::All));
        assert_eq!(
            Choice::<VehicleStatus>::from_str("maintenance"),
            Ok(Choice::Only(VehicleStatus::Maintenance))
        );
        assert!(Choice::<VehicleStatus>::from_str("parked").is_err());
        assert_eq!(Choice::Only(VehicleType::Car).label(), "car");
    }

    #[test]
    fn search_ignores_surrounding_whitespace() {
        assert!(matches_search(" an ", &["Trần An"]));
        assert!(matches_search("\t", &["anything"]));
        assert!(!matches_search(" an b", &["Trần An"]));
    }
}
