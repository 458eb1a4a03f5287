//! Wire types shared between the client and anything speaking the rental API.
//!
//! The backend is not consistent about envelopes: lists arrive bare or wrapped
//! in `{ data }`, `{ rentals }`, `{ vehicles }` and so on, and single objects
//! arrive bare or wrapped in `{ data }`. The types here absorb those variations
//! so callers only ever see the payload.

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    #[serde(default)]
    pub version: String,
}

/// Error body returned by the backend on a failed request.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ErrorMessage {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorMessage {
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .map(str::trim)
            .filter(|x| !x.is_empty())
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(
        alias = "rentals",
        alias = "vehicles",
        alias = "stations",
        alias = "users",
        alias = "reservations",
        alias = "incidents",
        alias = "violations",
        alias = "items"
    )]
    pub data: Vec<T>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Wrapped(ListEnvelope<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(v) => v,
            Listing::Wrapped(v) => v.data,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct SingleEnvelope<T> {
    pub data: T,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum Single<T> {
    Wrapped(SingleEnvelope<T>),
    Bare(T),
}

impl<T> Single<T> {
    pub fn into_inner(self) -> T {
        match self {
            Single::Wrapped(v) => v.data,
            Single::Bare(v) => v,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub deposit_amount: u64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CancelRequest {
    pub reason: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStationRequest {
    pub station_id: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct PaymentRequest {
    pub method: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn listing_accepts_every_envelope() {
        for body in [
            r#"[{"id":"a"}]"#,
            r#"{"data":[{"id":"a"}]}"#,
            r#"{"rentals":[{"id":"a"}],"total":1}"#,
            r#"{"success":true,"vehicles":[{"id":"a"}]}"#,
        ] {
            let listing: Listing<Item> = serde_json::from_str(body).unwrap();
            assert_eq!(listing.into_vec(), vec![Item { id: "a".into() }]);
        }
    }

    #[test]
    fn single_prefers_data_envelope() {
        let wrapped: Single<Item> = serde_json::from_str(r#"{"data":{"id":"x"}}"#).unwrap();
        let bare: Single<Item> = serde_json::from_str(r#"{"id":"y"}"#).unwrap();
        assert_eq!(wrapped.into_inner().id, "x");
        assert_eq!(bare.into_inner().id, "y");
    }

    #[test]
    fn error_message_falls_back_to_error_field() {
        let body: ErrorMessage = serde_json::from_str(r#"{"error":"Xe đang được thuê"}"#).unwrap();
        assert_eq!(body.text(), Some("Xe đang được thuê"));

        let empty: ErrorMessage = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(empty.text(), None);
    }
}
