//! The data client contract shared by the remote REST store and the local
//! SQLite database.

mod rest;

pub(crate) use rest::RestStore;

use anyhow::Result;

use crate::models::{FinanceItem, Goal, Month, NewFinanceItem, SavingsPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    Goals,
    Finance,
    Savings,
}

impl Table {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Goals => "yearly_goals",
            Self::Finance => "monthly_finance",
            Self::Savings => "savings_plan",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The boolean columns the dashboard can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flag {
    GoalCompleted,
    ItemChecked,
}

impl Flag {
    pub(crate) fn table(self) -> Table {
        match self {
            Self::GoalCompleted => Table::Goals,
            Self::ItemChecked => Table::Finance,
        }
    }

    pub(crate) fn column(self) -> &'static str {
        match self {
            Self::GoalCompleted => "is_completed",
            Self::ItemChecked => "is_checked",
        }
    }
}

/// One round trip per call. No retries or caching.
pub(crate) trait Store {
    /// Where the data lives, for the footer and logs.
    fn location(&self) -> String;

    fn goals(&self) -> Result<Vec<Goal>>;

    fn finance_items(&self, month: Month) -> Result<Vec<FinanceItem>>;

    fn savings_plans(&self) -> Result<Vec<SavingsPlan>>;

    fn set_flag(&self, flag: Flag, id: i64, value: bool) -> Result<()>;

    fn insert_finance_item(&self, item: &NewFinanceItem) -> Result<()>;
}
