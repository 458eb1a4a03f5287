use super::reference::Ref;
use super::station::Station;

wire_enum! {
    pub enum VehicleType {
        Car => ("car", "Ô tô"),
        Motorbike => ("motorbike", "Xe máy"),
    }
}

wire_enum! {
    pub enum VehicleStatus {
        Available => ("available", "Sẵn sàng"),
        Rented => ("rented", "Đang thuê"),
        Maintenance => ("maintenance", "Bảo trì"),
        Reserved => ("reserved", "Đã đặt"),
    }
}

entity! {
    pub struct Vehicle {
        pub license_plate: String,
        pub brand: String,
        pub model: String,
        #[serde(rename = "type")]
        pub kind: VehicleType,
        pub status: VehicleStatus,
        #[serde(default)]
        pub capacity: u32,
        #[serde(default)]
        pub range_per_full_charge: u32,
        pub price_per_hour: u64,
        #[serde(default)]
        pub station: Option<Ref<Station>>,
        /// Some endpoints send the station as a flat `stationId` instead.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub station_id: Option<String>,
        #[serde(default)]
        pub image_url: Option<String>,
        #[serde(default)]
        pub odo: u64,
        #[serde(default)]
        pub battery_level: u8,
    }
}

impl Vehicle {
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.license_plate)
    }

    pub fn station_id(&self) -> Option<&str> {
        self.station
            .as_ref()
            .map(|x| x.id())
            .or(self.station_id.as_deref())
    }

    pub fn station_name(&self) -> Option<&str> {
        match self.station.as_ref()? {
            Ref::Resolved(x) => Some(x.name.as_str()),
            Ref::Partial(x) => x.name.as_deref(),
            Ref::Id(_) => None,
        }
    }
}

impl Ref<Vehicle> {
    pub fn label(&self) -> String {
        match self {
            Ref::Resolved(x) => x.display_name(),
            Ref::Partial(x) => match (&x.brand, &x.model, &x.license_plate) {
                (Some(brand), Some(model), Some(plate)) => {
                    format!("{} {} ({})", brand, model, plate)
                }
                (_, _, Some(plate)) => plate.clone(),
                _ => x.id.clone(),
            },
            Ref::Id(id) => id.clone(),
        }
    }

    pub fn kind(&self) -> Option<VehicleType> {
        match self {
            Ref::Resolved(x) => Some(x.kind),
            Ref::Partial(x) => x.kind,
            Ref::Id(_) => None,
        }
    }

    pub fn price_per_hour(&self) -> Option<u64> {
        match self {
            Ref::Resolved(x) => Some(x.price_per_hour),
            Ref::Partial(x) => x.price_per_hour,
            Ref::Id(_) => None,
        }
    }
}
