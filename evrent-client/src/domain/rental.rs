use super::reference::Ref;
use super::station::Station;
use super::user::User;
use super::vehicle::Vehicle;
use time::OffsetDateTime;

wire_enum! {
    pub enum RentalStatus {
        Booked => ("booked", "Chờ nhận xe"),
        InUse => ("in_use", "Đang sử dụng"),
        WaitingForPayment => ("waiting_for_payment", "Chờ thanh toán"),
        Returned => ("returned", "Đã trả xe"),
        Cancelled => ("cancelled", "Đã hủy"),
    }
}

wire_enum! {
    pub enum DepositStatus {
        Pending => ("pending", "Chưa thu cọc"),
        Held => ("held", "Đã giữ cọc"),
        Returned => ("returned", "Đã hoàn cọc"),
    }
}

wire_enum! {
    pub enum RentalType {
        Booking => ("booking", "Đặt trước"),
        WalkIn => ("walk-in", "Thuê tại quầy"),
    }
}

wire_enum! {
    /// Tabs of the staff rental management screen.
    pub enum RentalTab {
        Handover => ("handover", "Giao xe"),
        InUse => ("in_use", "Đang thuê"),
        Return => ("return", "Trả xe"),
    }
}

impl RentalTab {
    pub fn next(self) -> Self {
        match self {
            RentalTab::Handover => RentalTab::InUse,
            RentalTab::InUse => RentalTab::Return,
            RentalTab::Return => RentalTab::Handover,
        }
    }
}

impl Default for RentalTab {
    fn default() -> Self {
        RentalTab::Handover
    }
}

entity! {
    pub struct Rental {
        pub renter: Ref<User>,
        pub vehicle: Ref<Vehicle>,
        #[serde(default)]
        pub station_pickup: Option<Ref<Station>>,
        #[serde(default)]
        pub station_return: Option<Ref<Station>>,
        #[serde(default)]
        pub staff_pickup: Option<Ref<User>>,
        #[serde(default)]
        pub staff_return: Option<Ref<User>>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        pub start_time: Option<OffsetDateTime>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        pub end_time: Option<OffsetDateTime>,
        pub status: RentalStatus,
        #[serde(default)]
        pub deposit_amount: u64,
        #[serde(default = "default_deposit_status")]
        pub deposit_status: DepositStatus,
        #[serde(default)]
        pub total_cost: Option<u64>,
        #[serde(default)]
        pub rental_cost: Option<u64>,
        /// Insurance premium in VND, zero when none was taken.
        #[serde(default)]
        pub insurance: u64,
        #[serde(default)]
        pub odo_start: Option<u64>,
        #[serde(default)]
        pub odo_end: Option<u64>,
        #[serde(default)]
        pub battery_level_start: Option<u8>,
        #[serde(default)]
        pub battery_level_end: Option<u8>,
        #[serde(default)]
        pub total_distance: Option<u64>,
        #[serde(default = "default_rental_type")]
        pub rental_type: RentalType,
    }
}

fn default_deposit_status() -> DepositStatus {
    DepositStatus::Pending
}

fn default_rental_type() -> RentalType {
    RentalType::Booking
}

impl Rental {
    /// The staff tab a rental shows up in, if any.
    pub fn tab(&self) -> Option<RentalTab> {
        match self.status {
            RentalStatus::Booked => Some(RentalTab::Handover),
            RentalStatus::InUse => Some(RentalTab::InUse),
            RentalStatus::WaitingForPayment => Some(RentalTab::Return),
            RentalStatus::Returned | RentalStatus::Cancelled => None,
        }
    }

    pub fn deposit_held(&self) -> bool {
        self.deposit_status == DepositStatus::Held
    }

    pub fn renter_name(&self) -> &str {
        self.renter.display_name()
    }

    pub fn renter_phone(&self) -> Option<&str> {
        self.renter.phone()
    }

    pub fn vehicle_label(&self) -> String {
        self.vehicle.label()
    }

    pub fn price_per_hour(&self) -> Option<u64> {
        self.vehicle.price_per_hour()
    }
}

