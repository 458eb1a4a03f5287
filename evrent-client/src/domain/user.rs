use super::default_true;
use super::reference::Ref;
use time::OffsetDateTime;

wire_enum! {
    pub enum Role {
        Admin => ("admin", "Quản trị viên"),
        Staff => ("staff", "Nhân viên"),
        Renter => ("renter", "Khách thuê"),
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    /// Document kind, e.g. `cccd`, `passport` or `driver_license`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub document_number: Option<String>,
    pub document_url: Option<String>,
    #[serde(default)]
    pub verified: bool,
    pub verified_by: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub verified_at: Option<OffsetDateTime>,
}

entity! {
    pub struct User {
        pub full_name: String,
        pub email: String,
        #[serde(default)]
        pub phone: String,
        pub role: Role,
        #[serde(default = "default_true")]
        pub is_active: bool,
        #[serde(default)]
        pub verification: Verification,
        /// Station a staff member is assigned to.
        #[serde(default)]
        pub station_id: Option<String>,
        #[serde(default)]
        pub is_high_risk: bool,
        #[serde(default, with = "time::serde::rfc3339::option")]
        pub created_at: Option<OffsetDateTime>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        pub updated_at: Option<OffsetDateTime>,
    }
}

impl User {
    pub fn is_verified(&self) -> bool {
        self.verification.verified
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Hoạt động"
        } else {
            "Đã khóa"
        }
    }
}

impl Ref<User> {
    /// Full name when populated, the bare id otherwise.
    pub fn display_name(&self) -> &str {
        match self {
            Ref::Resolved(x) => x.full_name.as_str(),
            Ref::Partial(x) => x.full_name.as_deref().unwrap_or(x.id.as_str()),
            Ref::Id(id) => id.as_str(),
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            Ref::Resolved(x) => Some(x.phone.as_str()),
            Ref::Partial(x) => x.phone.as_deref(),
            Ref::Id(_) => None,
        }
    }

    pub fn is_high_risk(&self) -> bool {
        match self {
            Ref::Resolved(x) => x.is_high_risk,
            Ref::Partial(x) => x.is_high_risk,
            Ref::Id(_) => false,
        }
    }
}
