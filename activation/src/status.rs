//! Activation records and the status evaluation rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of an activation check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationStatus {
    Active,
    Suspended,
    /// The tenant does not appear in the allow-list at all.
    NotFound,
    /// The list could not be fetched or parsed. Deliberately distinct from
    /// `Suspended`: a vendor outage should not lock paying tenants out.
    Error,
}

/// One tenant's entry in the vendor's allow-list.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ActivationInfo {
    pub status: ListedStatus,
    /// Optional subscription end date, `YYYY-MM-DD`. The entry stays active
    /// through the expiry day itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
}

/// The two states a listed tenant can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListedStatus {
    Active,
    Suspended,
}

impl ActivationInfo {
    /// Resolve the entry to a status as of `today`.
    ///
    /// An unparseable `expires` value is treated as expired rather than
    /// ignored, so a vendor typo fails closed.
    pub fn evaluate(&self, today: NaiveDate) -> ActivationStatus {
        if self.status == ListedStatus::Suspended {
            return ActivationStatus::Suspended;
        }
        if let Some(expires) = &self.expires {
            match NaiveDate::parse_from_str(expires, "%Y-%m-%d") {
                Ok(expiry) if expiry >= today => {}
                _ => return ActivationStatus::Suspended,
            }
        }
        ActivationStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn active(expires: Option<&str>) -> ActivationInfo {
        ActivationInfo {
            status: ListedStatus::Active,
            expires: expires.map(str::to_string),
        }
    }

    #[test]
    fn active_without_expiry_stays_active() {
        assert_eq!(active(None).evaluate(today()), ActivationStatus::Active);
    }

    #[test]
    fn expiry_day_itself_is_still_active() {
        assert_eq!(
            active(Some("2025-06-15")).evaluate(today()),
            ActivationStatus::Active
        );
        assert_eq!(
            active(Some("2025-06-14")).evaluate(today()),
            ActivationStatus::Suspended
        );
    }

    #[test]
    fn suspended_wins_over_future_expiry() {
        let info = ActivationInfo {
            status: ListedStatus::Suspended,
            expires: Some("2099-01-01".into()),
        };
        assert_eq!(info.evaluate(today()), ActivationStatus::Suspended);
    }

    #[test]
    fn garbled_expiry_fails_closed() {
        assert_eq!(
            active(Some("soon")).evaluate(today()),
            ActivationStatus::Suspended
        );
    }

    #[test]
    fn allow_list_json_shape() {
        let raw = r#"{
            "bar-sole": { "status": "active", "expires": "2025-12-31" },
            "bar-sprint": { "status": "active" },
            "bar-moroso": { "status": "suspended" }
        }"#;
        let list: std::collections::HashMap<String, ActivationInfo> =
            serde_json::from_str(raw).unwrap();
        assert_eq!(list["bar-sole"].status, ListedStatus::Active);
        assert_eq!(list["bar-sprint"].expires, None);
        assert_eq!(list["bar-moroso"].status, ListedStatus::Suspended);
    }
}
