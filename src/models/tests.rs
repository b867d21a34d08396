#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn item(id: i64, budget: Option<Decimal>, actual: Option<Decimal>) -> FinanceItem {
    FinanceItem {
        id,
        month: Month::new(3).unwrap(),
        title: format!("item {id}"),
        budget,
        actual,
        is_checked: false,
    }
}

fn plan(current: Option<Decimal>, target: Option<Decimal>) -> SavingsPlan {
    SavingsPlan {
        id: 1,
        target_name: "Trip".into(),
        current_amount: current,
        target_amount: target,
    }
}

// ── Month ─────────────────────────────────────────────────────

#[test]
fn test_month_range() {
    assert!(Month::new(0).is_none());
    assert!(Month::new(13).is_none());
    assert_eq!(Month::new(1), Some(Month::JANUARY));
    assert_eq!(Month::new(12), Some(Month::DECEMBER));
    assert_eq!(Month::all().count(), 12);
}

#[test]
fn test_month_wraps() {
    assert_eq!(Month::DECEMBER.next(), Month::JANUARY);
    assert_eq!(Month::JANUARY.prev(), Month::DECEMBER);
    assert_eq!(Month::new(6).unwrap().next().number(), 7);
    assert_eq!(Month::new(6).unwrap().prev().number(), 5);
}

#[test]
fn test_month_current_in_range() {
    let m = Month::current();
    assert!((1..=12).contains(&m.number()));
}

#[test]
fn test_month_parse() {
    assert_eq!(Month::parse("7").unwrap().number(), 7);
    assert_eq!(Month::parse(" 07 ").unwrap().number(), 7);
    assert_eq!(Month::parse("july").unwrap().number(), 7);
    assert_eq!(Month::parse("Jun").unwrap().number(), 6);
    assert_eq!(Month::parse("mar").unwrap().number(), 3);
    assert!(Month::parse("13").is_none());
    assert!(Month::parse("ju").is_none());
    assert!(Month::parse("smarch").is_none());
}

#[test]
fn test_month_display() {
    assert_eq!(Month::new(7).unwrap().to_string(), "07 July");
    assert_eq!(Month::DECEMBER.name(), "December");
}

#[test]
fn test_month_rejects_out_of_range_json() {
    let result: Result<Month, _> = serde_json::from_str("13");
    assert!(result.is_err());
    let ok: Month = serde_json::from_str("11").unwrap();
    assert_eq!(ok.number(), 11);
}

// ── Aggregate ─────────────────────────────────────────────────

#[test]
fn test_aggregate_sums_budget_and_actual() {
    let items = vec![
        item(1, Some(dec!(1200)), Some(dec!(1180.50))),
        item(2, Some(dec!(300)), Some(dec!(42))),
        item(3, Some(dec!(80.25)), Some(dec!(0))),
    ];
    let totals = aggregate(&items);
    assert_eq!(totals.budget, dec!(1580.25));
    assert_eq!(totals.actual, dec!(1222.50));
}

#[test]
fn test_aggregate_treats_missing_as_zero() {
    let items = vec![
        item(1, None, Some(dec!(10))),
        item(2, Some(dec!(25)), None),
        item(3, None, None),
    ];
    let totals = aggregate(&items);
    assert_eq!(totals.budget, dec!(25));
    assert_eq!(totals.actual, dec!(10));
}

#[test]
fn test_aggregate_empty() {
    assert_eq!(aggregate(&[]), Totals::default());
}

#[test]
fn test_totals_remaining() {
    let totals = Totals {
        budget: dec!(100),
        actual: dec!(130),
    };
    assert_eq!(totals.remaining(), dec!(-30));
}

// ── parse_budget ──────────────────────────────────────────────

#[test]
fn test_parse_budget_plain() {
    assert_eq!(parse_budget("1200"), dec!(1200));
    assert_eq!(parse_budget("  45 "), dec!(45));
    assert_eq!(parse_budget("12.50"), dec!(12.50));
    assert_eq!(parse_budget("-5"), dec!(-5));
    assert_eq!(parse_budget("+8"), dec!(8));
}

#[test]
fn test_parse_budget_takes_leading_number() {
    assert_eq!(parse_budget("120 for rent"), dec!(120));
    assert_eq!(parse_budget("99abc"), dec!(99));
}

#[test]
fn test_parse_budget_unparsable_is_zero() {
    assert_eq!(parse_budget("abc"), Decimal::ZERO);
    assert_eq!(parse_budget(""), Decimal::ZERO);
    assert_eq!(parse_budget("$40"), Decimal::ZERO);
}

// ── Savings progress ──────────────────────────────────────────

#[test]
fn test_progress_quarter() {
    let p = plan(Some(dec!(50)), Some(dec!(200)));
    assert_eq!(p.progress_percent(), dec!(25));
    assert!((p.progress_ratio() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn test_progress_clamps_at_hundred() {
    let p = plan(Some(dec!(300)), Some(dec!(200)));
    assert_eq!(p.progress_percent(), dec!(100));
    assert!((p.progress_ratio() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_progress_clamps_at_zero() {
    let p = plan(Some(dec!(-20)), Some(dec!(200)));
    assert_eq!(p.progress_percent(), Decimal::ZERO);
}

#[test]
fn test_progress_without_target() {
    assert_eq!(plan(Some(dec!(50)), Some(dec!(0))).progress_percent(), Decimal::ZERO);
    assert_eq!(plan(Some(dec!(50)), None).progress_percent(), Decimal::ZERO);
    assert_eq!(plan(None, Some(dec!(10))).progress_percent(), Decimal::ZERO);
}

// ── Row decoding ──────────────────────────────────────────────

#[test]
fn test_finance_item_from_json_with_nulls() {
    let json = r#"{"id": 4, "month": 7, "title": "Rent", "budget": 1200, "actual": null, "is_checked": null}"#;
    let row: FinanceItem = serde_json::from_str(json).unwrap();
    assert_eq!(row.id, 4);
    assert_eq!(row.month.number(), 7);
    assert_eq!(row.budget, Some(dec!(1200)));
    assert_eq!(row.actual, None);
    assert!(!row.is_checked);
}

#[test]
fn test_finance_item_missing_columns() {
    let json = r#"{"id": 9, "month": 1}"#;
    let row: FinanceItem = serde_json::from_str(json).unwrap();
    assert!(row.title.is_empty());
    assert_eq!(row.budget_or_zero(), Decimal::ZERO);
    assert_eq!(row.actual_or_zero(), Decimal::ZERO);
}

#[test]
fn test_finance_item_fractional_amounts() {
    let json = r#"{"id": 1, "month": 2, "title": "Coffee", "budget": 30.5, "actual": "12.25", "is_checked": true}"#;
    let row: FinanceItem = serde_json::from_str(json).unwrap();
    assert_eq!(row.budget, Some(dec!(30.5)));
    assert_eq!(row.actual, Some(dec!(12.25)));
    assert!(row.is_checked);
}

#[test]
fn test_goal_from_json() {
    let goal: Goal =
        serde_json::from_str(r#"{"id": 2, "goal_name": "Run a marathon", "is_completed": true}"#)
            .unwrap();
    assert_eq!(goal.goal_name, "Run a marathon");
    assert!(goal.is_completed);
    assert_eq!(goal.marker(), "✔");

    let open: Goal = serde_json::from_str(r#"{"id": 3, "goal_name": "Read", "is_completed": null}"#)
        .unwrap();
    assert!(!open.is_completed);
    assert_eq!(open.marker(), "○");
}

#[test]
fn test_savings_plan_from_json() {
    let p: SavingsPlan = serde_json::from_str(
        r#"{"id": 1, "target_name": "Emergency fund", "current_amount": 50, "target_amount": 200}"#,
    )
    .unwrap();
    assert_eq!(p.target_name, "Emergency fund");
    assert_eq!(p.progress_percent(), dec!(25));
}

// ── NewFinanceItem ────────────────────────────────────────────

#[test]
fn test_new_finance_item_defaults() {
    let new = NewFinanceItem::new(Month::new(7).unwrap(), "Rent".into(), dec!(1200));
    assert_eq!(new.actual, Decimal::ZERO);
    assert!(!new.is_checked);
}

#[test]
fn test_new_finance_item_json_uses_integers_for_whole_amounts() {
    let new = NewFinanceItem::new(Month::new(7).unwrap(), "Rent".into(), dec!(1200.00));
    let value = serde_json::to_value(&new).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "month": 7,
            "title": "Rent",
            "budget": 1200,
            "actual": 0,
            "is_checked": false
        })
    );
}

#[test]
fn test_new_finance_item_json_keeps_fractions() {
    let new = NewFinanceItem::new(Month::new(2).unwrap(), "Snacks".into(), dec!(12.5));
    let value = serde_json::to_value(&new).unwrap();
    assert_eq!(value["budget"], serde_json::json!(12.5));
}
