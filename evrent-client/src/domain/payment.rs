use super::rental::{Rental, RentalStatus};

wire_enum! {
    pub enum PaymentMethod {
        Cash => ("cash", "Tiền mặt"),
        Payos => ("payos", "PayOS"),
    }
}

wire_enum! {
    pub enum PaymentStatus {
        Pending => ("pending", "Chờ thanh toán"),
        Paid => ("paid", "Đã thanh toán"),
        Failed => ("failed", "Thất bại"),
    }
}

/// Bill computed by the backend for a returned rental.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default)]
    pub rental_id: String,
    #[serde(default)]
    pub rental_cost: u64,
    #[serde(default, alias = "totalFines")]
    pub violation_cost: u64,
    #[serde(default)]
    pub insurance: u64,
    #[serde(default)]
    pub deposit_amount: u64,
    pub total_cost: u64,
    /// What the renter still owes once the deposit is taken into account.
    #[serde(default)]
    pub amount_due: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    #[serde(default)]
    pub rental_id: String,
    pub method: PaymentMethod,
    #[serde(default)]
    pub amount: u64,
    pub status: PaymentStatus,
    /// Hosted checkout page returned for PayOS payments.
    #[serde(default)]
    pub checkout_url: Option<String>,
}

/// Payment row shown to staff. It has no identity of its own and is derived
/// from the rental it settles.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub rental_id: String,
    pub renter_name: String,
    pub vehicle_label: String,
    pub amount: u64,
    pub method: Option<PaymentMethod>,
    pub status: PaymentStatus,
}

impl Payment {
    pub fn from_rental(rental: &Rental) -> Self {
        let status = match rental.status {
            RentalStatus::Returned => PaymentStatus::Paid,
            _ => PaymentStatus::Pending,
        };
        let amount = rental
            .total_cost
            .or(rental.rental_cost.map(|x| x.saturating_add(rental.insurance)))
            .unwrap_or_default();

        Self {
            rental_id: rental.id.clone(),
            renter_name: rental.renter_name().to_string(),
            vehicle_label: rental.vehicle_label(),
            amount,
            method: None,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rental(status: &str, rental_cost: u64, insurance: u64) -> Rental {
        serde_json::from_value(serde_json::json!({
            "_id": "r1",
            "renter": "u1",
            "vehicle": "v1",
            "status": status,
            "rentalCost": rental_cost,
            "insurance": insurance,
        }))
        .unwrap()
    }

    #[test]
    fn amount_adds_insurance_to_rental_cost() {
        let payment = Payment::from_rental(&rental("waiting_for_payment", 180_000, 50_000));
        assert_eq!(payment.amount, 230_000);
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[test]
    fn amount_saturates_instead_of_overflowing() {
        let payment = Payment::from_rental(&rental("returned", u64::MAX, 50_000));
        assert_eq!(payment.amount, u64::MAX);
        assert_eq!(payment.status, PaymentStatus::Paid);
    }
}
