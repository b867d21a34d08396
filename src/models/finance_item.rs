use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::{null_as_default, Month};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FinanceItem {
    pub id: i64,
    pub month: Month,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub budget: Option<Decimal>,
    #[serde(default)]
    pub actual: Option<Decimal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_checked: bool,
}

impl FinanceItem {
    pub fn budget_or_zero(&self) -> Decimal {
        self.budget.unwrap_or(Decimal::ZERO)
    }

    pub fn actual_or_zero(&self) -> Decimal {
        self.actual.unwrap_or(Decimal::ZERO)
    }
}

/// A finance row as sent to the store on insert. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFinanceItem {
    pub month: Month,
    pub title: String,
    #[serde(serialize_with = "serialize_amount")]
    pub budget: Decimal,
    #[serde(serialize_with = "serialize_amount")]
    pub actual: Decimal,
    pub is_checked: bool,
}

impl NewFinanceItem {
    /// New line items start unspent and unchecked.
    pub fn new(month: Month, title: String, budget: Decimal) -> Self {
        Self {
            month,
            title,
            budget,
            actual: Decimal::ZERO,
            is_checked: false,
        }
    }
}

/// Whole amounts go out as JSON integers so integer columns accept them;
/// anything with a fractional part goes out as a float.
fn serialize_amount<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        if let Some(whole) = normalized.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    serializer.serialize_f64(normalized.to_f64().unwrap_or(0.0))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub budget: Decimal,
    pub actual: Decimal,
}

impl Totals {
    /// Actual spend left under budget. Negative when overspent.
    pub fn remaining(&self) -> Decimal {
        self.budget - self.actual
    }
}

/// Sum budget and actual over whatever items are loaded. Missing amounts count as zero.
pub fn aggregate(items: &[FinanceItem]) -> Totals {
    items.iter().fold(Totals::default(), |acc, item| Totals {
        budget: acc.budget + item.budget_or_zero(),
        actual: acc.actual + item.actual_or_zero(),
    })
}

#[allow(clippy::expect_used)]
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?").expect("leading number pattern"));

/// Parse free-form budget text. Takes the leading number and ignores the
/// rest (`"120 for rent"` is 120); text without one is zero.
pub fn parse_budget(text: &str) -> Decimal {
    let text = text.trim();
    let text = text.strip_prefix('+').unwrap_or(text);
    LEADING_NUMBER
        .find(text)
        .and_then(|m| Decimal::from_str(m.as_str()).ok())
        .unwrap_or(Decimal::ZERO)
}
