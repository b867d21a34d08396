#![allow(clippy::unwrap_used)]

use std::cell::{Cell, RefCell};

use anyhow::{bail, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::app::*;
use crate::db::Database;
use crate::models::*;
use crate::store::{Flag, Store};

/// Wraps an in-memory database, records every call, and can be switched
/// into a failing mode to stand in for an unreachable remote store.
struct RecordingStore {
    db: Database,
    calls: RefCell<Vec<String>>,
    failing: Cell<bool>,
}

impl RecordingStore {
    fn new() -> Self {
        Self {
            db: Database::open_in_memory().unwrap(),
            calls: RefCell::new(Vec::new()),
            failing: Cell::new(false),
        }
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.borrow_mut().push(call);
        if self.failing.get() {
            bail!("store unreachable");
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Store for RecordingStore {
    fn location(&self) -> String {
        "recording".into()
    }

    fn goals(&self) -> Result<Vec<Goal>> {
        self.record("goals".into())?;
        self.db.goals()
    }

    fn finance_items(&self, month: Month) -> Result<Vec<FinanceItem>> {
        self.record(format!("finance_items({})", month.number()))?;
        self.db.finance_items(month)
    }

    fn savings_plans(&self) -> Result<Vec<SavingsPlan>> {
        self.record("savings_plans".into())?;
        self.db.savings_plans()
    }

    fn set_flag(&self, flag: Flag, id: i64, value: bool) -> Result<()> {
        self.record(format!("set_flag({}, {id}, {value})", flag.column()))?;
        self.db.set_flag(flag, id, value)
    }

    fn insert_finance_item(&self, item: &NewFinanceItem) -> Result<()> {
        self.record(format!("insert({}, {})", item.title, item.budget))?;
        self.db.insert_finance_item(item)
    }
}

const RELOAD_MARCH: [&str; 3] = ["goals", "finance_items(3)", "savings_plans"];

fn month(n: u8) -> Month {
    Month::new(n).unwrap()
}

fn setup() -> (RecordingStore, App) {
    let store = RecordingStore::new();
    let mut app = App::new(month(3), store.location());
    app.reload(&store);
    store.clear();
    (store, app)
}

fn seed_item(store: &RecordingStore, m: u8, title: &str, budget: Decimal) {
    store
        .db
        .insert_finance_item(&NewFinanceItem::new(month(m), title.into(), budget))
        .unwrap();
}

// ── Reload ────────────────────────────────────────────────────

#[test]
fn test_new_app_defaults() {
    let app = App::new(month(5), "somewhere".into());
    assert_eq!(app.tab, Tab::Finance);
    assert_eq!(app.month, month(5));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.running);
}

#[test]
fn test_reload_fetches_all_three_in_order() {
    let (store, mut app) = setup();
    app.reload(&store);
    assert_eq!(store.calls(), RELOAD_MARCH);
}

#[test]
fn test_failed_reload_keeps_loaded_state() {
    let (store, mut app) = setup();
    seed_item(&store, 3, "Rent", dec!(1200));
    store.db.insert_goal("Save more", false).unwrap();
    app.reload(&store);
    assert_eq!(app.finance_items.len(), 1);
    assert_eq!(app.goals.len(), 1);

    store.failing.set(true);
    app.reload(&store);
    assert_eq!(app.finance_items.len(), 1);
    assert_eq!(app.goals.len(), 1);
    assert!(app.status_message.is_empty());
}

// ── Tab and month selection ───────────────────────────────────

#[test]
fn test_switching_tab_reloads_everything() {
    let (store, mut app) = setup();
    app.select_tab(&store, Tab::Savings);
    assert_eq!(app.tab, Tab::Savings);
    assert_eq!(store.calls(), RELOAD_MARCH);
}

#[test]
fn test_selecting_same_tab_does_not_reload() {
    let (store, mut app) = setup();
    app.select_tab(&store, Tab::Finance);
    assert!(store.calls().is_empty());
}

#[test]
fn test_month_seven_reload_filters_to_july() {
    let (store, mut app) = setup();
    seed_item(&store, 3, "March rent", dec!(1000));
    seed_item(&store, 7, "July rent", dec!(1200));
    seed_item(&store, 7, "July trip", dec!(800));
    seed_item(&store, 8, "August rent", dec!(1200));

    app.select_month(&store, month(7));

    assert_eq!(
        store.calls(),
        ["goals", "finance_items(7)", "savings_plans"]
    );
    assert_eq!(app.finance_items.len(), 2);
    assert!(app.finance_items.iter().all(|i| i.month == month(7)));
    assert!(!app.finance_items.iter().any(|i| i.title.starts_with("March")));
}

#[test]
fn test_selecting_same_month_does_not_reload() {
    let (store, mut app) = setup();
    app.select_month(&store, month(3));
    assert!(store.calls().is_empty());
}

#[test]
fn test_month_change_resets_row_cursor() {
    let (store, mut app) = setup();
    seed_item(&store, 3, "a", dec!(1));
    seed_item(&store, 3, "b", dec!(1));
    app.reload(&store);
    app.item_index = 1;
    app.select_month(&store, month(4));
    assert_eq!(app.item_index, 0);
}

// ── Toggle ────────────────────────────────────────────────────

#[test]
fn test_toggle_writes_negation_then_reloads() {
    let (store, mut app) = setup();
    seed_item(&store, 3, "Phone", dec!(60));
    app.reload(&store);
    let id = app.finance_items[0].id;
    store.clear();

    app.toggle_flag(&store, Flag::ItemChecked, id, false);

    let calls = store.calls();
    assert_eq!(calls[0], format!("set_flag(is_checked, {id}, true)"));
    assert_eq!(&calls[1..], RELOAD_MARCH);
    assert!(app.finance_items[0].is_checked);
}

#[test]
fn test_toggle_twice_restores_flag() {
    let (store, mut app) = setup();
    let id = store.db.insert_goal("Learn piano", false).unwrap();
    app.reload(&store);

    let current = app.goals[0].is_completed;
    app.toggle_flag(&store, Flag::GoalCompleted, id, current);
    assert!(app.goals[0].is_completed);
    let current = app.goals[0].is_completed;
    app.toggle_flag(&store, Flag::GoalCompleted, id, current);
    assert!(!app.goals[0].is_completed);
}

#[test]
fn test_toggle_goal_uses_completed_column() {
    let (store, mut app) = setup();
    let id = store.db.insert_goal("Travel", false).unwrap();
    app.reload(&store);
    app.tab = Tab::Goals;
    store.clear();

    app.toggle_selected(&store);

    assert_eq!(store.calls()[0], format!("set_flag(is_completed, {id}, true)"));
}

#[test]
fn test_toggle_selected_finance_row() {
    let (store, mut app) = setup();
    seed_item(&store, 3, "first", dec!(1));
    seed_item(&store, 3, "second", dec!(2));
    app.reload(&store);
    app.item_index = 1;

    app.toggle_selected(&store);

    assert!(!app.finance_items[0].is_checked);
    assert!(app.finance_items[1].is_checked);
}

#[test]
fn test_toggle_selected_on_savings_does_nothing() {
    let (store, mut app) = setup();
    store
        .db
        .insert_savings_plan("Car", Some(dec!(1)), Some(dec!(2)))
        .unwrap();
    app.reload(&store);
    app.tab = Tab::Savings;
    store.clear();

    app.toggle_selected(&store);
    assert!(store.calls().is_empty());
}

#[test]
fn test_failed_toggle_still_reloads_silently() {
    let (store, mut app) = setup();
    store.failing.set(true);

    app.toggle_flag(&store, Flag::ItemChecked, 42, false);

    let calls = store.calls();
    assert_eq!(calls[0], "set_flag(is_checked, 42, true)");
    assert_eq!(&calls[1..], RELOAD_MARCH);
    assert!(app.status_message.is_empty());
}

// ── Add item ──────────────────────────────────────────────────

#[test]
fn test_add_item_empty_title_does_nothing() {
    let (store, mut app) = setup();
    assert!(!app.add_item(&store, "", "100"));
    assert!(!app.add_item(&store, "   ", "100"));
    assert!(store.calls().is_empty());
}

#[test]
fn test_add_item_unparsable_budget_is_zero() {
    let (store, mut app) = setup();
    assert!(app.add_item(&store, "Rent", "abc"));

    let calls = store.calls();
    assert_eq!(calls[0], "insert(Rent, 0)");
    assert_eq!(&calls[1..], RELOAD_MARCH);

    let rent = &app.finance_items[0];
    assert_eq!(rent.title, "Rent");
    assert_eq!(rent.budget_or_zero(), Decimal::ZERO);
    assert_eq!(rent.actual_or_zero(), Decimal::ZERO);
    assert!(!rent.is_checked);
}

#[test]
fn test_add_item_scoped_to_selected_month() {
    let (store, mut app) = setup();
    app.select_month(&store, month(11));
    app.add_item(&store, "Gifts", "250");

    let november = store.db.finance_items(month(11)).unwrap();
    assert_eq!(november.len(), 1);
    assert_eq!(november[0].budget, Some(dec!(250)));
    assert!(store.db.finance_items(month(3)).unwrap().is_empty());
}

#[test]
fn test_form_submit_adds_and_closes() {
    let (store, mut app) = setup();
    app.open_form("");
    assert_eq!(app.input_mode, InputMode::Form);
    for c in "Water bill".chars() {
        app.form.push(c);
    }
    app.form.switch_focus();
    for c in "45".chars() {
        app.form.push(c);
    }

    app.submit_form(&store);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.finance_items.len(), 1);
    assert_eq!(app.finance_items[0].budget, Some(dec!(45)));
    assert_eq!(app.status_message, "Added: Water bill");
    assert!(app.form.title.is_empty());
}

#[test]
fn test_form_submit_with_empty_title_closes_without_insert() {
    let (store, mut app) = setup();
    app.open_form("");
    app.form.switch_focus();
    app.form.push('9');

    app.submit_form(&store);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(store.calls().is_empty());
    assert!(app.status_message.is_empty());
}

#[test]
fn test_form_cancel_discards_input() {
    let (store, mut app) = setup();
    app.open_form("Draft");
    app.form.backspace();
    assert_eq!(app.form.title, "Draf");
    app.cancel_form();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.form.title.is_empty());
    assert!(store.calls().is_empty());
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_totals_follow_loaded_month() {
    let (store, mut app) = setup();
    seed_item(&store, 3, "Rent", dec!(1200));
    seed_item(&store, 3, "Food", dec!(400));
    seed_item(&store, 4, "April", dec!(999));
    app.reload(&store);

    let totals = app.totals();
    assert_eq!(totals.budget, dec!(1600));
    assert_eq!(totals.actual, Decimal::ZERO);

    app.select_month(&store, month(4));
    assert_eq!(app.totals().budget, dec!(999));
}

#[test]
fn test_selection_clamped_after_rows_disappear() {
    let (store, mut app) = setup();
    seed_item(&store, 3, "only", dec!(1));
    app.reload(&store);
    app.item_index = 5;
    app.reload(&store);
    assert_eq!(app.item_index, 0);
}

// ── Tab order ─────────────────────────────────────────────────

#[test]
fn test_tab_cycle() {
    assert_eq!(Tab::Goals.next(), Tab::Finance);
    assert_eq!(Tab::Savings.next(), Tab::Goals);
    assert_eq!(Tab::Goals.prev(), Tab::Savings);
    assert_eq!(Tab::Finance.prev(), Tab::Goals);
}
