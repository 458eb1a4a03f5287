use super::vehicle::VehicleType;

pub trait HasId {
    fn id(&self) -> &str;
}

entity! {
    /// The handful of fields an endpoint populates when it only selects a few
    /// columns of the referenced document.
    pub struct Stub {
        #[serde(default)]
        pub full_name: Option<String>,
        #[serde(default)]
        pub phone: Option<String>,
        #[serde(default)]
        pub email: Option<String>,
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub license_plate: Option<String>,
        #[serde(default)]
        pub brand: Option<String>,
        #[serde(default)]
        pub model: Option<String>,
        #[serde(rename = "type", default)]
        pub kind: Option<VehicleType>,
        #[serde(default)]
        pub price_per_hour: Option<u64>,
        #[serde(default)]
        pub is_high_risk: bool,
    }
}

/// A reference to another entity. The backend sends either the bare id, the
/// populated document or a projection of it depending on the endpoint.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Resolved(Box<T>),
    Partial(Box<Stub>),
}

impl<T: HasId> Ref<T> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id.as_str(),
            Ref::Resolved(v) => v.id(),
            Ref::Partial(v) => v.id.as_str(),
        }
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Ref::Resolved(v) => Some(v.as_ref()),
            Ref::Id(_) | Ref::Partial(_) => None,
        }
    }

    pub fn partial(&self) -> Option<&Stub> {
        match self {
            Ref::Partial(v) => Some(v.as_ref()),
            Ref::Id(_) | Ref::Resolved(_) => None,
        }
    }

    pub fn is(&self, id: &str) -> bool {
        self.id() == id
    }
}

impl<T> From<T> for Ref<T> {
    fn from(value: T) -> Self {
        Ref::Resolved(Box::new(value))
    }
}
