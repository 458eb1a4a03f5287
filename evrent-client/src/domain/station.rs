use super::reference::Ref;
use super::user::User;

wire_enum! {
    pub enum StationStatus {
        Active => ("active", "Đang hoạt động"),
        Inactive => ("inactive", "Ngừng hoạt động"),
        Maintenance => ("maintenance", "Bảo trì"),
    }
}

entity! {
    pub struct Station {
        pub name: String,
        #[serde(default)]
        pub address: String,
        #[serde(default)]
        pub latitude: f64,
        #[serde(default)]
        pub longitude: f64,
        pub status: StationStatus,
        #[serde(default)]
        pub staff: Vec<Ref<User>>,
    }
}

