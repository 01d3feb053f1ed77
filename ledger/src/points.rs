//! Pure point transitions over a customer record.
//!
//! Each function returns the updated record or a failure signal; none of
//! them touch storage, and none of them care how the caller was authorized.
//! The customer's `coffees` stays in `[0, max]` through every transition.

use timbro_types::Customer;

use crate::LedgerError;

/// Add one stamp. Fails (leaving the record unchanged) if the card is full.
pub fn accrue(customer: &Customer, max: u8) -> Result<Customer, LedgerError> {
    if customer.coffees >= max {
        return Err(LedgerError::CardFull);
    }
    let mut updated = customer.clone();
    updated.coffees += 1;
    Ok(updated)
}

/// Redeem a full card, resetting it to zero. Fails below `max` stamps.
pub fn redeem(customer: &Customer, max: u8) -> Result<Customer, LedgerError> {
    if customer.coffees < max {
        return Err(LedgerError::NotRedeemable);
    }
    let mut updated = customer.clone();
    updated.coffees = 0;
    Ok(updated)
}

/// Administrative override: clamp `n` into `[0, max]` and apply
/// unconditionally. The only transition without a precondition — meant for
/// manual correction, never for the scan-driven flow.
pub fn set_points(customer: &Customer, n: i32, max: u8) -> Customer {
    let mut updated = customer.clone();
    updated.coffees = n.clamp(0, max as i32) as u8;
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use timbro_types::CustomerId;

    fn customer_with(coffees: u8) -> Customer {
        Customer {
            id: CustomerId::new("c1"),
            name: "Mario Rossi".into(),
            coffees,
        }
    }

    #[test]
    fn accrue_increments_until_full() {
        let mut customer = customer_with(0);
        for expected in 1..=10 {
            customer = accrue(&customer, 10).unwrap();
            assert_eq!(customer.coffees, expected);
        }
        assert!(matches!(accrue(&customer, 10), Err(LedgerError::CardFull)));
        assert_eq!(customer.coffees, 10);
    }

    #[test]
    fn redeem_requires_full_card() {
        assert!(matches!(
            redeem(&customer_with(9), 10),
            Err(LedgerError::NotRedeemable)
        ));
        let redeemed = redeem(&customer_with(10), 10).unwrap();
        assert_eq!(redeemed.coffees, 0);
    }

    #[test]
    fn set_points_clamps_into_range() {
        assert_eq!(set_points(&customer_with(5), -3, 10).coffees, 0);
        assert_eq!(set_points(&customer_with(5), 99, 10).coffees, 10);
        assert_eq!(set_points(&customer_with(5), 7, 10).coffees, 7);
    }
}
