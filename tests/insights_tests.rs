// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneylens::insights::budget::{self, FALLBACK_TIPS, OVERSPEND_ALERT};
use moneylens::insights::{
    INSUFFICIENT_DATA, InsightEngine, Period, TransactionDataset, categories, clustering, trend,
    weekly,
};
use moneylens::models::RawTransaction;

// 2025-04-17 is a Thursday in ISO week 16; week 15 is Apr 7-13, week 14 is Mar 31-Apr 6.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 17).unwrap()
}

fn period() -> Period {
    Period::from_date(today())
}

fn tx(amount: f64, category: i64, date: &str) -> RawTransaction {
    RawTransaction::new(amount, category, date, "")
}

fn dataset(rows: &[RawTransaction]) -> TransactionDataset {
    TransactionDataset::build(rows)
}

fn sample() -> Vec<RawTransaction> {
    vec![
        RawTransaction::new("75.50", 1, "2025-04-07", "Groceries"),
        RawTransaction::new("22.00", 2, "2025-04-08", "Movie"),
        RawTransaction::new("105.75", 1, "2025-03-31", "Groceries"),
        RawTransaction::new("50.00", 4, "2025-04-01", "Fuel"),
        RawTransaction::new("300.00", 3, "2025-04-05", "Household items"),
        RawTransaction::new("60.00", 2, "2025-04-06", "Dinner out"),
        RawTransaction::new("90.00", 7, "2025-04-09", "Electricity"),
        RawTransaction::new("1500.00", 1, "2025-04-14", "Weekly Groceries"),
        RawTransaction::new("35.00", 2, "2025-04-15", "Coffee"),
        RawTransaction::new("200.00", 3, "2025-04-17", "Cleaning supplies"),
    ]
}

#[test]
fn fewer_than_ten_transactions_short_circuits() {
    let mut rows = sample();
    rows.truncate(9);
    rows.push(RawTransaction::new("abc", 1, "2025-04-10", ""));
    rows.push(RawTransaction::new("10", "x", "2025-04-10", ""));
    rows.push(RawTransaction::new("10", 1, "not a date", ""));

    let insights = InsightEngine::new(&rows, today()).generate_insights();
    assert_eq!(insights, vec![INSUFFICIENT_DATA.to_string()]);
}

#[test]
fn normalization_drops_unparsable_records() {
    let rows = vec![
        tx(10.0, 1, "2025-04-10"),
        RawTransaction::new("ten", 1, "2025-04-10", ""),
        RawTransaction::new("10", "1.5", "2025-04-10", ""),
        RawTransaction::new("10", 1, "2025-02-30", ""),
        RawTransaction::new("10", 1, "04/11/2025", ""),
        RawTransaction::dated("12.5", 2, NaiveDate::from_ymd_opt(2025, 4, 12).unwrap()),
        RawTransaction::new("10", 1, "20250407", ""),
        RawTransaction::new("10", 1, "7-Apr-2025", ""),
        RawTransaction::new("10", 1, "2025-13-01", ""),
    ];
    let ds = dataset(&rows);
    assert_eq!(ds.len(), 5);
    assert_eq!(ds.rows()[1].date, NaiveDate::from_ymd_opt(2025, 4, 11).unwrap());
    assert_eq!(ds.rows()[2].description, "");
    assert_eq!(ds.rows()[3].date, NaiveDate::from_ymd_opt(2025, 4, 7).unwrap());
    assert_eq!(ds.rows()[4].date, NaiveDate::from_ymd_opt(2025, 4, 7).unwrap());
}

#[test]
fn full_sample_produces_every_insight() {
    let insights = InsightEngine::new(&sample(), today()).generate_insights();
    assert_eq!(insights.len(), 5, "{:#?}", insights);
    assert!(insights[0].contains("rose by 825%"));
    assert!(insights[1].contains("• Groceries: ₹1,681.25 (69.0%)"));
    assert!(insights[1].contains("• Household: ₹500.00 (20.5%)"));
    assert!(insights[2].starts_with("🔍 Cluster 1:"));
    assert_eq!(insights[2].lines().count(), 3);
    assert!(insights[3].contains("expected to"));
    assert!(insights[4].contains("'Groceries' is consuming 69%"));
}

#[test]
fn generating_twice_is_identical() {
    let engine = InsightEngine::new(&sample(), today());
    assert_eq!(engine.generate_insights(), engine.generate_insights());
}

#[test]
fn currency_symbol_is_configurable() {
    let insights = InsightEngine::new(&sample(), today())
        .with_currency_symbol("$")
        .generate_insights();
    assert!(insights[1].contains("• Groceries: $1,681.25"));
}

#[test]
fn one_failing_analysis_does_not_hide_the_others() {
    // Totals cancel out, so category ranking and budget ratios cannot be computed.
    let mut rows = Vec::new();
    for _ in 0..5 {
        rows.push(tx(100.0, 1, "2025-04-16"));
        rows.push(tx(-100.0, 2, "2025-04-16"));
    }
    let insights = InsightEngine::new(&rows, today()).generate_insights();
    assert_eq!(insights.len(), 3, "{:#?}", insights);
    assert!(insights[0].contains("expected to"));
    assert_eq!(insights[1], FALLBACK_TIPS[0]);
    assert_eq!(insights[2], FALLBACK_TIPS[1]);
}

#[test]
fn weekly_reports_current_spend_when_last_week_is_empty() {
    let ds = dataset(&[tx(500.0, 1, "2025-04-15"), tx(80.0, 1, "2025-03-31")]);
    let msg = weekly::compare_weeks(&ds, period(), "₹").unwrap().unwrap();
    assert_eq!(msg, "Current week spending: ₹500.00");
}

#[test]
fn weekly_needs_two_weeks_of_data() {
    let ds = dataset(&[tx(500.0, 1, "2025-04-15"), tx(80.0, 1, "2025-04-16")]);
    assert_eq!(weekly::compare_weeks(&ds, period(), "₹").unwrap(), None);
}

#[test]
fn weekly_small_rise_is_stable() {
    let ds = dataset(&[tx(103.0, 1, "2025-04-15"), tx(100.0, 1, "2025-04-08")]);
    let msg = weekly::compare_weeks(&ds, period(), "₹").unwrap().unwrap();
    assert!(msg.contains("stayed within"));
    assert!(!msg.contains("rose"));
}

#[test]
fn weekly_small_drop_is_stable_not_reduced() {
    let ds = dataset(&[tx(97.0, 1, "2025-04-15"), tx(100.0, 1, "2025-04-08")]);
    let msg = weekly::compare_weeks(&ds, period(), "₹").unwrap().unwrap();
    assert!(msg.contains("stayed within"));
    assert!(!msg.contains("reduced"));
}

#[test]
fn weekly_drop_reports_reduction() {
    let ds = dataset(&[tx(80.0, 1, "2025-04-15"), tx(100.0, 1, "2025-04-08")]);
    let msg = weekly::compare_weeks(&ds, period(), "₹").unwrap().unwrap();
    assert!(msg.contains("reduced your weekly expenses by 20%"));
}

#[test]
fn weekly_rise_reports_percentage() {
    let ds = dataset(&[tx(150.0, 1, "2025-04-15"), tx(100.0, 1, "2025-04-08")]);
    let msg = weekly::compare_weeks(&ds, period(), "₹").unwrap().unwrap();
    assert!(msg.contains("rose by 50%"));
}

#[test]
fn weekly_ignores_other_years() {
    let ds = dataset(&[
        tx(150.0, 1, "2025-04-15"),
        tx(100.0, 1, "2024-04-10"),
        tx(100.0, 1, "2024-04-02"),
    ]);
    assert_eq!(weekly::compare_weeks(&ds, period(), "₹").unwrap(), None);
}

#[test]
fn late_december_is_week_one_of_the_next_iso_year() {
    // 2024-12-30 is the Monday of ISO week 1 of 2025.
    let today = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
    let period = Period::from_date(today);
    assert_eq!(
        period,
        Period {
            iso_week: 1,
            year: 2025
        }
    );

    let ds = dataset(&[
        tx(999.0, 1, "2024-01-02"),
        tx(50.0, 1, "2024-12-30"),
        tx(10.0, 1, "2024-06-10"),
        tx(70.0, 1, "2025-01-07"),
    ]);
    let msg = weekly::compare_weeks(&ds, period, "₹").unwrap().unwrap();
    assert_eq!(msg, "Current week spending: ₹50.00");
}

#[test]
fn new_years_day_in_week_fifty_three_compares_with_week_fifty_two() {
    // 2027-01-01 is a Friday in ISO week 53 of 2026.
    let today = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
    let period = Period::from_date(today);
    assert_eq!(
        period,
        Period {
            iso_week: 53,
            year: 2026
        }
    );

    let ds = dataset(&[
        tx(120.0, 1, "2026-12-31"),
        tx(100.0, 1, "2026-12-22"),
        tx(500.0, 1, "2027-01-05"),
    ]);
    let msg = weekly::compare_weeks(&ds, period, "₹").unwrap().unwrap();
    assert!(msg.contains("rose by 20%"), "{}", msg);
}

#[test]
fn overspend_alert_uses_the_iso_year_around_new_year() {
    let today = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
    let rows = vec![
        tx(100.0, 1, "2026-12-01"),
        tx(100.0, 1, "2026-12-08"),
        tx(100.0, 1, "2026-12-15"),
        tx(500.0, 1, "2026-12-22"),
    ];
    let recs = budget::recommendations(&dataset(&rows), Period::from_date(today));
    assert!(recs.contains(&OVERSPEND_ALERT.to_string()), "{:#?}", recs);
}

#[test]
fn category_ranking_shows_share_with_one_decimal() {
    let ds = dataset(&[
        tx(300.0, 3, "2025-04-01"),
        tx(100.0, 1, "2025-04-02"),
        tx(50.0, 4, "2025-04-03"),
    ]);
    let msg = categories::rank_categories(&ds, "₹").unwrap().unwrap();
    let lines: Vec<&str> = msg.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "• Household: ₹300.00 (66.7%)");
    assert_eq!(lines[2], "• Groceries: ₹100.00 (22.2%)");
    assert_eq!(lines[3], "• Transportation: ₹50.00 (11.1%)");
}

#[test]
fn category_ranking_keeps_top_three_and_breaks_ties_by_name() {
    let ds = dataset(&[
        tx(100.0, 7, "2025-04-01"),
        tx(100.0, 2, "2025-04-02"),
        tx(100.0, 1, "2025-04-03"),
        tx(10.0, 8, "2025-04-03"),
    ]);
    let msg = categories::rank_categories(&ds, "₹").unwrap().unwrap();
    let lines: Vec<&str> = msg.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("• Entertainment:"));
    assert!(lines[2].starts_with("• Groceries:"));
    assert!(lines[3].starts_with("• Utilities:"));
}

#[test]
fn category_ranking_without_known_categories_is_silent() {
    let ds = dataset(&[tx(10.0, 5, "2025-04-01"), tx(10.0, 9, "2025-04-02")]);
    assert_eq!(categories::rank_categories(&ds, "₹").unwrap(), None);
}

#[test]
fn clustering_without_variety_is_silent() {
    let ds = dataset(&[
        tx(10.0, 1, "2025-04-01"),
        tx(10.0, 1, "2025-04-02"),
        tx(25.0, 2, "2025-04-03"),
    ]);
    assert_eq!(clustering::summarize_clusters(&ds, "₹").unwrap(), None);

    let empty = dataset(&[]);
    assert_eq!(clustering::summarize_clusters(&empty, "₹").unwrap(), None);
}

#[test]
fn clustering_names_nearest_category() {
    let rows: Vec<RawTransaction> = [
        (10.0, 1),
        (12.0, 1),
        (11.0, 1),
        (400.0, 3),
        (420.0, 3),
        (410.0, 3),
        (2000.0, 8),
        (2100.0, 8),
        (2050.0, 8),
    ]
    .iter()
    .map(|&(a, c)| tx(a, c, "2025-04-01"))
    .collect();
    let msg = clustering::summarize_clusters(&dataset(&rows), "₹")
        .unwrap()
        .unwrap();
    let lines: Vec<&str> = msg.lines().collect();
    assert_eq!(
        lines,
        vec![
            "🔍 Cluster 1: Average spending = ₹11.00, Category = Groceries",
            "🔍 Cluster 2: Average spending = ₹410.00, Category = Household",
            "🔍 Cluster 3: Average spending = ₹2,050.00, Category = Others",
        ]
    );
}

#[test]
fn nearest_category_rounds_and_handles_the_gap() {
    assert_eq!(clustering::nearest_category(2.6), "Household");
    assert_eq!(clustering::nearest_category(5.2), "Unknown");
    assert_eq!(clustering::nearest_category(0.2), "Unknown");
}

#[test]
fn trend_prediction_is_increase_or_decrease() {
    let ds = dataset(&sample());
    let msg = trend::predict_trend(&ds).unwrap().unwrap();
    let increase = msg.contains("increase");
    let decrease = msg.contains("decrease");
    assert!(increase != decrease, "{}", msg);
}

#[test]
fn trend_features_follow_row_order() {
    let ds = dataset(&[
        tx(50.0, 1, "2025-04-15"),
        tx(80.0, 1, "2025-04-08"),
        tx(20.0, 1, "2025-04-01"),
    ]);
    let (features, labels) = trend::training_set(&ds);
    assert_eq!(features, vec![[0.0, 50.0], [-1.0, 80.0], [-1.0, 20.0]]);
    assert_eq!(labels, vec![true, false, false]);
}

#[test]
fn trend_on_falling_amounts_predicts_decrease() {
    let rows: Vec<RawTransaction> = (0..10)
        .map(|i| tx(1000.0 - i as f64 * 50.0, 1, "2025-04-15"))
        .collect();
    let msg = trend::predict_trend(&dataset(&rows)).unwrap().unwrap();
    assert!(msg.contains("expected to decrease"));
}

#[test]
fn trend_without_rows_is_an_error() {
    assert!(trend::predict_trend(&dataset(&[])).is_err());
}

fn shares(groceries: f64) -> Vec<RawTransaction> {
    vec![
        tx(groceries, 1, "2025-04-15"),
        tx(550.0 - groceries, 3, "2025-04-15"),
        tx(250.0, 4, "2025-04-15"),
        tx(200.0, 7, "2025-04-15"),
    ]
}

#[test]
fn budget_threshold_is_strict() {
    let recs = budget::recommendations(&dataset(&shares(300.0)), period());
    assert!(recs.iter().all(|r| !r.contains("'Groceries'")), "{:#?}", recs);
    assert_eq!(recs, FALLBACK_TIPS.map(String::from).to_vec());

    let recs = budget::recommendations(&dataset(&shares(301.0)), period());
    assert_eq!(recs.len(), 1);
    assert!(recs[0].contains("'Groceries' is consuming 30%"));
}

#[test]
fn budget_flags_overspending_last_week() {
    let rows = vec![
        tx(100.0, 1, "2025-03-18"),
        tx(100.0, 2, "2025-03-25"),
        tx(100.0, 3, "2025-04-01"),
        tx(500.0, 4, "2025-04-08"),
    ];
    let recs = budget::recommendations(&dataset(&rows), period());
    assert!(recs.contains(&OVERSPEND_ALERT.to_string()), "{:#?}", recs);
}

#[test]
fn engine_keeps_only_two_recommendations() {
    let mut rows = vec![
        tx(100.0, 1, "2025-03-18"),
        tx(100.0, 1, "2025-03-25"),
        tx(100.0, 3, "2025-04-01"),
        tx(100.0, 3, "2025-04-01"),
        tx(1000.0, 4, "2025-04-08"),
    ];
    for _ in 0..5 {
        rows.push(tx(20.0, 2, "2025-04-16"));
    }
    let recs = budget::recommendations(&dataset(&rows), period());
    assert_eq!(recs.len(), 2);
    assert!(recs[0].contains("'Transportation' is consuming 67%"));
    assert_eq!(recs[1], OVERSPEND_ALERT);

    let insights = InsightEngine::new(&rows, today()).generate_insights();
    assert_eq!(insights[insights.len() - 2..], recs[..]);
}
