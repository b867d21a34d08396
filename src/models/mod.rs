mod finance_item;
mod goal;
mod month;
mod savings_plan;

pub use finance_item::{aggregate, parse_budget, FinanceItem, NewFinanceItem, Totals};
pub use goal::Goal;
pub use month::Month;
pub use savings_plan::SavingsPlan;

use serde::{Deserialize, Deserializer};

/// Rows written by other clients may carry `null` where we expect a value.
/// Treat those the same as a missing column.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests;
