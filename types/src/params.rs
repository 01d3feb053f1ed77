//! Loyalty parameters — every time window and limit the protocol depends on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable parameters shared by the issuer, the token guard and the
/// scan validator.
///
/// Invariant: `token_retention_ms >= credential_ttl_ms`, so a consumed-token
/// entry is never garbage-collected while its credential could still pass the
/// freshness check.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoyaltyParams {
    /// How long a presentation credential stays acceptable after issuance.
    pub credential_ttl_ms: u64,

    /// How often the presenting side re-issues a fresh credential.
    pub reissue_interval_ms: u64,

    /// How long consumed-token entries are retained before opportunistic
    /// garbage collection removes them.
    pub token_retention_ms: u64,

    /// Number of stamps a full card holds.
    pub max_coffees: u8,
}

impl LoyaltyParams {
    /// The intended production configuration.
    pub fn loyalty_defaults() -> Self {
        Self {
            credential_ttl_ms: 30_000,
            reissue_interval_ms: 20_000,
            token_retention_ms: 5 * 60 * 1000,
            max_coffees: crate::customer::MAX_COFFEES,
        }
    }

    /// Load parameters from a TOML document, validating the retention
    /// invariant.
    pub fn from_toml_str(raw: &str) -> Result<Self, ParamsError> {
        let params: Self = toml::from_str(raw)?;
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<(), ParamsError> {
        if self.token_retention_ms < self.credential_ttl_ms {
            return Err(ParamsError::RetentionTooShort {
                retention_ms: self.token_retention_ms,
                ttl_ms: self.credential_ttl_ms,
            });
        }
        Ok(())
    }
}

/// Default is the production loyalty configuration.
impl Default for LoyaltyParams {
    fn default() -> Self {
        Self::loyalty_defaults()
    }
}

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("invalid parameter file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("token retention ({retention_ms}ms) shorter than credential ttl ({ttl_ms}ms)")]
    RetentionTooShort { retention_ms: u64, ttl_ms: u64 },
}
