//! Client side validation of every form that is submitted to the backend.
//!
//! The forms double as request bodies: once `validate` passes they are
//! serialized as is.

use crate::domain::{Role, Severity, StationStatus, User, VehicleStatus, VehicleType};
use crate::messages;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use time::OffsetDateTime;
use validator::{Validate, ValidationError, ValidationErrors};

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^(0|\+84)\d{9}$").unwrap();
    static ref LETTER_RE: Regex = Regex::new(r"[A-Za-z]").unwrap();
    static ref DIGIT_RE: Regex = Regex::new(r"\d").unwrap();
}

/// A single message attached to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Flattens validator errors into field/message pairs, sorted by field.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| FieldError {
                field: field.clone(),
                message: e
                    .message
                    .as_ref()
                    .map(|x| x.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    out
}

/// Runs the derived validation and returns the messages to show inline.
pub fn check<F: Validate>(form: &F) -> Result<(), Vec<FieldError>> {
    form.validate().map_err(|e| field_errors(&e))
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() >= 8 && LETTER_RE.is_match(value) && DIGIT_RE.is_match(value) {
        Ok(())
    } else {
        Err(error(
            "password",
            "Mật khẩu phải có ít nhất 8 ký tự, gồm chữ và số",
        ))
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("required", "Không được để trống"))
    } else {
        Ok(())
    }
}

/// True when `email` already belongs to one of `users`, ignoring case.
pub fn email_taken(users: &[User], email: &str) -> bool {
    let email = email.trim();
    users.iter().any(|x| x.email.trim().eq_ignore_ascii_case(email))
}

/// Rejects an email that is already in use with the message the personnel
/// screen shows before anything is sent.
pub fn ensure_unique_email(users: &[User], email: &str) -> Result<(), FieldError> {
    if email_taken(users, email) {
        Err(FieldError {
            field: "email".into(),
            message: messages::EMAIL_EXISTS.into(),
        })
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Validate, serde::Serialize)]
pub struct LoginForm {
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: String,
    #[validate(length(min = 1, message = "Vui lòng nhập mật khẩu"))]
    pub password: String,
}

/// Staff or admin account created from the personnel screen.
#[derive(Debug, Clone, Validate, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelForm {
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: String,
    #[validate(regex(path = *PHONE_RE, message = "Số điện thoại không hợp lệ"))]
    pub phone: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
}

/// Profile fields an admin may edit on an existing user.
#[derive(Debug, Clone, Validate, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdateForm {
    #[validate(custom(function = "not_blank"))]
    pub full_name: String,
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: String,
    #[validate(regex(path = *PHONE_RE, message = "Số điện thoại không hợp lệ"))]
    pub phone: String,
}

impl From<&User> for CustomerUpdateForm {
    fn from(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Validate, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleForm {
    #[validate(custom(function = "not_blank"))]
    pub license_plate: String,
    #[validate(custom(function = "not_blank"))]
    pub brand: String,
    #[validate(custom(function = "not_blank"))]
    pub model: String,
    #[serde(rename = "type")]
    pub kind: VehicleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[validate(range(min = 1, max = 50, message = "Số chỗ phải từ 1 đến 50"))]
    pub capacity: u32,
    #[validate(range(min = 1, max = 2000, message = "Quãng đường phải từ 1 đến 2000 km"))]
    pub range_per_full_charge: u32,
    #[validate(range(min = 1000, message = "Giá thuê tối thiểu 1.000 ₫/giờ"))]
    pub price_per_hour: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
    #[validate(range(max = 100, message = "Mức pin phải từ 0 đến 100"))]
    pub battery_level: u8,
    pub odo: u64,
}

#[derive(Debug, Clone, Validate, serde::Serialize)]
pub struct StationForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Vĩ độ không hợp lệ"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Kinh độ không hợp lệ"))]
    pub longitude: f64,
    pub status: StationStatus,
}

#[derive(Debug, Clone, Validate, serde::Serialize)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_reservation_window"))]
pub struct ReservationForm {
    #[validate(custom(function = "not_blank"))]
    pub vehicle_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub reserved_start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub reserved_end_time: OffsetDateTime,
    /// Insurance premium in VND.
    pub insurance: u64,
}

fn validate_reservation_window(form: &ReservationForm) -> Result<(), ValidationError> {
    if form.reserved_end_time > form.reserved_start_time {
        Ok(())
    } else {
        Err(error(
            "window",
            "Thời gian kết thúc phải sau thời gian bắt đầu",
        ))
    }
}

/// Condition report filled in when the renter takes the vehicle.
#[derive(Debug, Clone, Validate, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupForm {
    pub odo: u64,
    #[validate(range(max = 100, message = "Mức pin phải từ 0 đến 100"))]
    pub battery_level: u8,
    #[validate(custom(function = "not_blank"))]
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Condition report filled in when the vehicle comes back.
#[derive(Debug, Clone, Validate, serde::Serialize)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_return_odo"))]
pub struct ReturnForm {
    pub odo: u64,
    #[validate(range(max = 100, message = "Mức pin phải từ 0 đến 100"))]
    pub battery_level: u8,
    #[validate(custom(function = "not_blank"))]
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Reading taken at pickup, only used for validation.
    #[serde(skip)]
    pub pickup_odo: Option<u64>,
}

fn validate_return_odo(form: &ReturnForm) -> Result<(), ValidationError> {
    match form.pickup_odo {
        Some(start) if form.odo < start => Err(error(
            "odo",
            "Số km khi trả không được nhỏ hơn lúc nhận xe",
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Validate, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationForm {
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(range(min = 1, message = "Số tiền phạt phải lớn hơn 0"))]
    pub fine_amount: u64,
}

#[derive(Debug, Clone, Validate, serde::Serialize)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_incident_target"))]
pub struct IncidentForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    pub severity: Severity,
}

fn validate_incident_target(form: &IncidentForm) -> Result<(), ValidationError> {
    let targets = [&form.rental_id, &form.vehicle_id, &form.station_id];
    if targets
        .iter()
        .any(|x| x.as_deref().is_some_and(|v| !v.trim().is_empty()))
    {
        Ok(())
    } else {
        Err(error(
            "target",
            "Cần chọn lượt thuê, xe hoặc trạm liên quan",
        ))
    }
}

/// Rental opened at the counter without a prior reservation.
#[derive(Debug, Clone, Validate, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkInForm {
    #[validate(custom(function = "not_blank"))]
    pub renter_id: String,
    #[validate(custom(function = "not_blank"))]
    pub vehicle_id: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub expected_end_time: Option<OffsetDateTime>,
    pub deposit_amount: u64,
    pub insurance: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn personnel() -> PersonnelForm {
        PersonnelForm {
            full_name: "Trần Văn Bình".into(),
            email: "binh@evrent.vn".into(),
            phone: "0912345678".into(),
            password: "matkhau123".into(),
            role: Role::Staff,
            station_id: None,
        }
    }

    fn messages_for<'a>(errors: &'a [FieldError], field: &str) -> Vec<&'a str> {
        errors
            .iter()
            .filter(|x| x.field == field)
            .map(|x| x.message.as_str())
            .collect()
    }

    #[test]
    fn phone_pattern() {
        assert!(is_valid_phone("0912345678"));
        assert!(is_valid_phone("+84912345678"));
        assert!(!is_valid_phone("912345678"));
        assert!(!is_valid_phone("09123456789"));
        assert!(!is_valid_phone("+8491234567a"));
    }

    #[test]
    fn personnel_form_accepts_valid_input() {
        assert_eq!(check(&personnel()), Ok(()));
    }

    #[test]
    fn personnel_form_reports_each_field() {
        let form = PersonnelForm {
            full_name: "  ".into(),
            email: "not-an-email".into(),
            phone: "123".into(),
            password: "abcdefgh".into(),
            ..personnel()
        };
        let errors = check(&form).unwrap_err();

        assert_eq!(messages_for(&errors, "full_name"), vec!["Không được để trống"]);
        assert_eq!(messages_for(&errors, "email"), vec!["Email không hợp lệ"]);
        assert_eq!(messages_for(&errors, "phone"), vec!["Số điện thoại không hợp lệ"]);
        assert_eq!(messages_for(&errors, "password").len(), 1);
    }

    #[test]
    fn password_needs_letter_and_digit() {
        assert!(validate_password("abc12345").is_ok());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password("abcdefgh").is_err());
        assert!(validate_password("ab12").is_err());
    }

    #[test]
    fn vehicle_ranges() {
        let form = VehicleForm {
            license_plate: "51H-123.45".into(),
            brand: "VinFast".into(),
            model: "VF e34".into(),
            kind: VehicleType::Car,
            status: None,
            capacity: 0,
            range_per_full_charge: 2001,
            price_per_hour: 999,
            station_id: None,
            battery_level: 101,
            odo: 0,
        };
        let errors = check(&form).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|x| x.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "battery_level",
                "capacity",
                "price_per_hour",
                "range_per_full_charge"
            ]
        );
    }

    #[test]
    fn reservation_end_must_follow_start() {
        let form = ReservationForm {
            vehicle_id: "v1".into(),
            reserved_start_time: datetime!(2024-06-01 09:00 UTC),
            reserved_end_time: datetime!(2024-06-01 09:00 UTC),
            insurance: 0,
        };
        assert!(check(&form).is_err());

        let form = ReservationForm {
            reserved_end_time: datetime!(2024-06-01 12:00 UTC),
            ..form
        };
        assert!(check(&form).is_ok());
    }

    #[test]
    fn return_odo_cannot_go_backwards() {
        let form = ReturnForm {
            odo: 1200,
            battery_level: 40,
            condition: "Bình thường".into(),
            notes: None,
            pickup_odo: Some(1500),
        };
        assert!(check(&form).is_err());
        assert!(check(&ReturnForm {
            pickup_odo: Some(1000),
            ..form
        })
        .is_ok());
    }

    #[test]
    fn duplicate_email_ignores_case() {
        let users: Vec<User> = serde_json::from_str(
            r#"[{"_id":"u1","fullName":"A","email":"Staff@EVRent.vn","phone":"0900000000","role":"staff"}]"#,
        )
        .unwrap();

        assert!(email_taken(&users, "staff@evrent.vn"));
        let err = ensure_unique_email(&users, " STAFF@evrent.vn ").unwrap_err();
        assert_eq!(err.message, "Email đã tồn tại");
        assert!(ensure_unique_email(&users, "other@evrent.vn").is_ok());
    }

    #[test]
    fn forms_serialize_camel_case() {
        let value = serde_json::to_value(ViolationForm {
            description: "Đỗ sai quy định".into(),
            fine_amount: 200_000,
        })
        .unwrap();
        assert_eq!(value["fineAmount"], 200_000);

        let value = serde_json::to_value(ReturnForm {
            odo: 10,
            battery_level: 50,
            condition: "OK".into(),
            notes: None,
            pickup_odo: Some(1),
        })
        .unwrap();
        assert_eq!(value["batteryLevel"], 50);
        assert!(value.get("pickupOdo").is_none());
    }
}
