use evrent_client::domain::VehicleType;
use evrent_client::pricing::{
    billable_hours, calculate_high_risk_deposit, calculate_rental_cost, deposit_due, quote,
    HIGH_RISK_DEPOSIT,
};
use evrent_client::settings::DepositSettings;
use quickcheck_macros::quickcheck;
use time::macros::datetime;
use time::Duration;

fn deposits() -> DepositSettings {
    DepositSettings {
        car: 5_000_000,
        motorbike: 2_000_000,
    }
}

#[quickcheck]
fn cost_never_decreases_with_more_hours(hours: u16, price: u32) -> bool {
    let hours = u32::from(hours);
    let price = u64::from(price);
    calculate_rental_cost(hours, price) <= calculate_rental_cost(hours + 1, price)
}

#[quickcheck]
fn first_day_is_billed_at_full_price(hours: u8, price: u32) -> bool {
    let hours = u32::from(hours % 25);
    calculate_rental_cost(hours, u64::from(price)) == u64::from(hours) * u64::from(price)
}

#[quickcheck]
fn longer_rentals_never_exceed_full_price(hours: u16, price: u32) -> bool {
    let hours = u32::from(hours);
    let price = u64::from(price);
    calculate_rental_cost(hours, price) <= u64::from(hours) * price
}

#[quickcheck]
fn high_risk_deposit_is_at_least_the_floor(base: u32) -> bool {
    let base = u64::from(base);
    let deposit = calculate_high_risk_deposit(base);
    deposit >= HIGH_RISK_DEPOSIT && deposit >= base
}

#[test]
fn discount_tiers_apply_to_their_hours_only() {
    // 24h full + 48h at 90 % + 8h at 80 %
    let cost = calculate_rental_cost(80, 10_000);
    assert_eq!(cost, 240_000 + 432_000 + 64_000);
}

#[test]
fn high_risk_deposit_tops_up_large_bases() {
    assert_eq!(calculate_high_risk_deposit(5_000_000), 10_000_000);
    assert_eq!(calculate_high_risk_deposit(10_000_000), 20_000_000);
    assert_eq!(calculate_high_risk_deposit(15_000_000), 25_000_000);
}

#[test]
fn deposit_depends_on_vehicle_and_risk() {
    let deposits = deposits();
    assert_eq!(deposit_due(VehicleType::Car, &deposits, false), 5_000_000);
    assert_eq!(deposit_due(VehicleType::Motorbike, &deposits, false), 2_000_000);
    assert_eq!(deposit_due(VehicleType::Motorbike, &deposits, true), 10_000_000);
}

#[test]
fn partial_hours_round_up() {
    let start = datetime!(2026-10-20 08:00 UTC);
    assert_eq!(billable_hours(start, start), 0);
    assert_eq!(billable_hours(start, start - Duration::hours(1)), 0);
    assert_eq!(billable_hours(start, start + Duration::minutes(61)), 2);

    let q = quote(start, start + Duration::minutes(150), 40_000, 30_000);
    assert_eq!(q.hours, 3);
    assert_eq!(q.total, 150_000);
}
