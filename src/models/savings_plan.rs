use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::null_as_default;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavingsPlan {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_name: String,
    #[serde(default)]
    pub current_amount: Option<Decimal>,
    #[serde(default)]
    pub target_amount: Option<Decimal>,
}

impl SavingsPlan {
    pub fn current_or_zero(&self) -> Decimal {
        self.current_amount.unwrap_or(Decimal::ZERO)
    }

    pub fn target_or_zero(&self) -> Decimal {
        self.target_amount.unwrap_or(Decimal::ZERO)
    }

    /// Progress toward the target in percent, clamped to `0..=100`.
    /// A plan without a positive target shows no progress.
    pub fn progress_percent(&self) -> Decimal {
        let target = self.target_or_zero();
        if target <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let hundred = Decimal::ONE_HUNDRED;
        self.current_or_zero()
            .checked_div(target)
            .and_then(|ratio| ratio.checked_mul(hundred))
            .unwrap_or(hundred)
            .clamp(Decimal::ZERO, hundred)
    }

    pub fn progress_ratio(&self) -> f64 {
        (self.progress_percent() / Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    }
}
