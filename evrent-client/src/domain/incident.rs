use time::OffsetDateTime;

wire_enum! {
    pub enum Severity {
        Low => ("low", "Thấp"),
        Medium => ("medium", "Trung bình"),
        High => ("high", "Cao"),
    }
}

wire_enum! {
    pub enum IncidentStatus {
        Pending => ("pending", "Chờ xử lý"),
        InReview => ("in_review", "Đang xem xét"),
        Resolved => ("resolved", "Đã xử lý"),
    }
}

entity! {
    pub struct Incident {
        #[serde(default)]
        pub rental_id: Option<String>,
        #[serde(default)]
        pub vehicle_id: Option<String>,
        #[serde(default)]
        pub station_id: Option<String>,
        pub description: String,
        pub severity: Severity,
        pub status: IncidentStatus,
        #[serde(default, with = "time::serde::rfc3339::option")]
        pub created_at: Option<OffsetDateTime>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        pub updated_at: Option<OffsetDateTime>,
    }
}

