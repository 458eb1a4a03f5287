use super::reference::Ref;
use super::user::User;
use super::vehicle::Vehicle;
use time::OffsetDateTime;

wire_enum! {
    pub enum ReservationStatus {
        Pending => ("pending", "Chờ xác nhận"),
        Confirmed => ("confirmed", "Đã xác nhận"),
        Active => ("active", "Đang thuê"),
        Completed => ("completed", "Hoàn thành"),
        Cancelled => ("cancelled", "Đã hủy"),
    }
}

entity! {
    pub struct Reservation {
        pub renter: Ref<User>,
        pub vehicle: Ref<Vehicle>,
        #[serde(with = "time::serde::rfc3339")]
        pub reserved_start_time: OffsetDateTime,
        #[serde(with = "time::serde::rfc3339")]
        pub reserved_end_time: OffsetDateTime,
        pub status: ReservationStatus,
        /// Insurance premium in VND, zero when none was taken.
        #[serde(default)]
        pub insurance: u64,
        #[serde(default)]
        pub cancelled_by: Option<String>,
        #[serde(default)]
        pub cancelled_reason: Option<String>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        pub created_at: Option<OffsetDateTime>,
    }
}

impl Reservation {
    /// Staff can only check in reservations the backend has confirmed.
    pub fn awaiting_check_in(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }

    pub fn cancellable(&self) -> bool {
        matches!(
            self.status,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        )
    }

    pub fn renter_name(&self) -> &str {
        self.renter.display_name()
    }

    pub fn vehicle_label(&self) -> String {
        self.vehicle.label()
    }
}

