use time::OffsetDateTime;

entity! {
    pub struct Violation {
        #[serde(default)]
        pub rental_id: String,
        pub description: String,
        #[serde(alias = "penaltyAmount")]
        pub fine_amount: u64,
        #[serde(default, with = "time::serde::rfc3339::option")]
        pub created_at: Option<OffsetDateTime>,
    }
}


pub fn total_fines(violations: &[Violation]) -> u64 {
    violations.iter().map(|x| x.fine_amount).sum()
}
