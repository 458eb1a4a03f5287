//! Display-only price previews. The backend computes the authoritative bill;
//! these numbers are shown before it is fetched.

use crate::domain::VehicleType;
use crate::settings::DepositSettings;
use time::OffsetDateTime;

/// Hours billed at the full hourly rate.
pub const FULL_RATE_HOURS: u32 = 24;
/// Last hour billed at the first discount tier.
pub const FIRST_TIER_END: u32 = 72;
pub const FIRST_TIER_PERCENT: u64 = 90;
pub const SECOND_TIER_PERCENT: u64 = 80;

pub const HIGH_RISK_DEPOSIT: u64 = 10_000_000;

/// Whole hours between two instants, rounded up. Zero when `end` is not after `start`.
pub fn billable_hours(start: OffsetDateTime, end: OffsetDateTime) -> u32 {
    let seconds = (end - start).whole_seconds();
    if seconds <= 0 {
        return 0;
    }

    let hours = (seconds as u64).div_ceil(3600);
    u32::try_from(hours).unwrap_or(u32::MAX)
}

/// Rental cost preview with a marginal discount: the first 24 hours at full
/// price, hours 25 to 72 at 90 % and anything after at 80 %.
///
/// Each tier only discounts the hours that fall in it, so the result never
/// decreases when `hours` grows.
pub fn calculate_rental_cost(hours: u32, price_per_hour: u64) -> u64 {
    let hours = u64::from(hours);
    let full = hours.min(u64::from(FULL_RATE_HOURS));
    let first = hours
        .saturating_sub(u64::from(FULL_RATE_HOURS))
        .min(u64::from(FIRST_TIER_END - FULL_RATE_HOURS));
    let second = hours.saturating_sub(u64::from(FIRST_TIER_END));

    let full_cost = full.saturating_mul(price_per_hour);
    let first_cost = first
        .saturating_mul(price_per_hour)
        .saturating_mul(FIRST_TIER_PERCENT)
        / 100;
    let second_cost = second
        .saturating_mul(price_per_hour)
        .saturating_mul(SECOND_TIER_PERCENT)
        / 100;

    full_cost
        .saturating_add(first_cost)
        .saturating_add(second_cost)
}

/// Deposit asked from a renter flagged as high risk.
pub fn calculate_high_risk_deposit(base: u64) -> u64 {
    if base < HIGH_RISK_DEPOSIT {
        HIGH_RISK_DEPOSIT
    } else {
        base + HIGH_RISK_DEPOSIT
    }
}

pub fn base_deposit(kind: VehicleType, deposits: &DepositSettings) -> u64 {
    match kind {
        VehicleType::Car => deposits.car,
        VehicleType::Motorbike => deposits.motorbike,
    }
}

pub fn deposit_due(kind: VehicleType, deposits: &DepositSettings, high_risk: bool) -> u64 {
    let base = base_deposit(kind, deposits);
    if high_risk {
        calculate_high_risk_deposit(base)
    } else {
        base
    }
}

/// Cost preview shown before a reservation is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub hours: u32,
    pub rental_cost: u64,
    pub insurance: u64,
    pub total: u64,
}

pub fn quote(
    start: OffsetDateTime,
    end: OffsetDateTime,
    price_per_hour: u64,
    insurance: u64,
) -> Quote {
    let hours = billable_hours(start, end);
    let rental_cost = calculate_rental_cost(hours, price_per_hour);
    Quote {
        hours,
        rental_cost,
        insurance,
        total: rental_cost.saturating_add(insurance),
    }
}

/// Formats an amount the way receipts show it, e.g. `1.250.000 ₫`.
pub fn format_vnd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out.push_str(" ₫");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn billable_hours_rounds_up() {
        let start = datetime!(2024-05-01 08:00 UTC);
        assert_eq!(billable_hours(start, datetime!(2024-05-01 08:00 UTC)), 0);
        assert_eq!(billable_hours(start, datetime!(2024-05-01 08:01 UTC)), 1);
        assert_eq!(billable_hours(start, datetime!(2024-05-01 10:00 UTC)), 2);
        assert_eq!(billable_hours(start, datetime!(2024-05-02 08:30 UTC)), 25);
        assert_eq!(billable_hours(start, datetime!(2024-04-30 08:00 UTC)), 0);
    }

    #[test]
    fn cost_tiers() {
        assert_eq!(calculate_rental_cost(0, 50_000), 0);
        assert_eq!(calculate_rental_cost(24, 50_000), 1_200_000);
        // 24 full hours + 1 hour at 90 %
        assert_eq!(calculate_rental_cost(25, 50_000), 1_245_000);
        // 24 full + 48 at 90 % + 8 at 80 %
        assert_eq!(
            calculate_rental_cost(80, 50_000),
            1_200_000 + 2_160_000 + 320_000
        );
    }

    #[test]
    fn high_risk_deposit() {
        assert_eq!(calculate_high_risk_deposit(0), 10_000_000);
        assert_eq!(calculate_high_risk_deposit(5_000_000), 10_000_000);
        assert_eq!(calculate_high_risk_deposit(9_999_999), 10_000_000);
        assert_eq!(calculate_high_risk_deposit(10_000_000), 20_000_000);
        assert_eq!(calculate_high_risk_deposit(12_500_000), 22_500_000);
    }

    #[test]
    fn deposit_due_uses_vehicle_kind() {
        let deposits = DepositSettings {
            car: 5_000_000,
            motorbike: 2_000_000,
        };
        assert_eq!(deposit_due(VehicleType::Car, &deposits, false), 5_000_000);
        assert_eq!(deposit_due(VehicleType::Motorbike, &deposits, true), 10_000_000);
    }

    #[test]
    fn quote_adds_insurance() {
        let q = quote(
            datetime!(2024-05-01 08:00 UTC),
            datetime!(2024-05-01 10:30 UTC),
            40_000,
            30_000,
        );
        assert_eq!(q.hours, 3);
        assert_eq!(q.rental_cost, 120_000);
        assert_eq!(q.total, 150_000);
    }

    #[test]
    fn vnd_grouping() {
        assert_eq!(format_vnd(0), "0 ₫");
        assert_eq!(format_vnd(950), "950 ₫");
        assert_eq!(format_vnd(1_000), "1.000 ₫");
        assert_eq!(format_vnd(1_250_000), "1.250.000 ₫");
    }
}
