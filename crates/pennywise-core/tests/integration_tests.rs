//! Integration tests for pennywise-core
//!
//! These tests exercise the full record → aggregate → advise workflow
//! through the public API, against the SQLite store and the in-memory
//! stores from `test_utils`.

use chrono::NaiveDate;
use pennywise_core::{
    db::Database,
    models::{Kind, NewTemplate, NewTransaction},
    test_utils::{tx, FailingStore, MemoryStore, TEST_USER},
    AdviceOutcome, AdviceTopic, Advisor, AdvisorConfig, Aggregator,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(db: &Database, user_id: i64, kind: Kind, category: &str, amount: f64, day: NaiveDate) {
    let category = db
        .find_category(user_id, kind, category)
        .unwrap()
        .expect("default category exists");
    db.add_transaction(user_id, &NewTransaction::new(kind, amount, category.id, day))
        .unwrap();
}

// =============================================================================
// Aggregation Workflow
// =============================================================================

#[test]
fn test_quarter_of_activity() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let user_id = db.create_user("quarter", None).unwrap();
    let today = date(2024, 3, 20);

    for month in 1..=3 {
        record(&db, user_id, Kind::Income, "Salary", 3000.0, date(2024, month, 1));
        record(&db, user_id, Kind::Expense, "Housing", 1200.0, date(2024, month, 2));
    }
    record(&db, user_id, Kind::Expense, "Groceries", 300.0, date(2024, 3, 15));

    let aggregator = Aggregator::new(&db, user_id).with_today(today);

    let march = aggregator.monthly_summary(2024, 3).unwrap();
    assert_eq!(march.income, 3000.0);
    assert_eq!(march.expenses, 1500.0);
    assert_eq!(march.balance, 1500.0);
    assert_eq!(march.transaction_count, 3);

    let trends = aggregator.monthly_trends(4).unwrap();
    let months: Vec<&str> = trends.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(months, vec!["2023-12", "2024-01", "2024-02", "2024-03"]);
    assert!(!trends[0].has_activity());

    let forecast = aggregator.predict_next_month().unwrap().expect("three active months");
    assert_eq!(forecast.predicted_income, 3000.0);
    assert_eq!(forecast.predicted_expenses, 1300.0);
    assert_eq!(forecast.predicted_balance, 1700.0);

    let top = aggregator
        .top_expense_categories(date(2024, 1, 1), today, 1)
        .unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "Housing");
    assert_eq!(top[0].amount, 3600.0);
}

#[test]
fn test_users_are_isolated() {
    let db = Database::in_memory().unwrap();
    let alice = db.create_user("alice", None).unwrap();
    let bob = db.create_user("bob", None).unwrap();
    let today = date(2024, 5, 31);

    record(&db, alice, Kind::Expense, "Health", 250.0, date(2024, 5, 3));

    let bob_view = Aggregator::new(&db, bob)
        .with_today(today)
        .category_breakdown(date(2024, 5, 1), today)
        .unwrap();
    assert!(bob_view.is_empty());

    let bob_advice = Advisor::new(&db, bob).with_today(today).spending_advice();
    assert_eq!(
        bob_advice.into_messages(),
        vec!["You had no expenses last month. Great!".to_string()]
    );
}

#[test]
fn test_template_posting_feeds_aggregates() {
    let db = Database::in_memory().unwrap();
    let user_id = db.create_user("templated", None).unwrap();
    let housing = db
        .find_category(user_id, Kind::Expense, "Housing")
        .unwrap()
        .unwrap();

    let template_id = db
        .add_template(
            user_id,
            &NewTemplate {
                name: "Rent".to_string(),
                amount: 950.0,
                category_id: housing.id,
                kind: Kind::Expense,
            },
        )
        .unwrap();

    // Saving a template records nothing until it is posted
    let aggregator = Aggregator::new(&db, user_id).with_today(date(2024, 7, 31));
    assert_eq!(aggregator.monthly_summary(2024, 7).unwrap().transaction_count, 0);

    db.post_template(user_id, template_id, date(2024, 7, 1)).unwrap();
    assert_eq!(aggregator.monthly_summary(2024, 7).unwrap().expenses, 950.0);
}

// =============================================================================
// Advice Workflow
// =============================================================================

#[test]
fn test_savings_advice_uses_declared_income() {
    let db = Database::in_memory().unwrap();
    let user_id = db.create_user("saver", None).unwrap();
    db.set_monthly_income(user_id, 2000.0).unwrap();

    record(&db, user_id, Kind::Income, "Salary", 5000.0, date(2024, 4, 1));
    record(&db, user_id, Kind::Expense, "Housing", 4700.0, date(2024, 4, 2));

    let user = db.get_user(user_id).unwrap().unwrap();
    let outcome = Advisor::new(&db, user_id)
        .with_today(date(2024, 4, 30))
        .savings_advice(user.monthly_income);

    assert_eq!(
        outcome,
        AdviceOutcome::Advice {
            messages: vec!["Your savings rate of 15.0% is within the recommended range.".to_string()]
        }
    );
}

#[test]
fn test_custom_thresholds_change_advice() {
    let db = Database::in_memory().unwrap();
    let user_id = db.create_user("strict", None).unwrap();
    let today = date(2024, 6, 30);

    record(&db, user_id, Kind::Expense, "Transport", 400.0, date(2024, 6, 20));
    record(&db, user_id, Kind::Expense, "Groceries", 600.0, date(2024, 6, 21));
    record(&db, user_id, Kind::Expense, "Groceries", 1000.0, date(2024, 5, 15));

    // Defaults: 60% share is called out, a 0% change is not
    let default_feed = Advisor::new(&db, user_id)
        .with_today(today)
        .spending_advice()
        .into_messages();
    assert_eq!(
        default_feed,
        vec!["You spend 60.0% of your budget on Groceries. Consider cutting back on it.".to_string()]
    );

    let lenient = AdvisorConfig::from_toml("[spending]\ndominant_share_percent = 70.0\n").unwrap();
    let lenient_feed = Advisor::new(&db, user_id)
        .with_config(lenient)
        .with_today(today)
        .spending_advice()
        .into_messages();
    assert_eq!(
        lenient_feed,
        vec!["Your spending looks stable. Keep it up!".to_string()]
    );
}

// =============================================================================
// In-Memory Stores
// =============================================================================

#[test]
fn test_memory_store_matches_sqlite_aggregates() {
    let db = Database::in_memory().unwrap();
    let user_id = db.create_user("mirror", None).unwrap();
    let today = date(2024, 3, 20);

    record(&db, user_id, Kind::Income, "Salary", 2000.0, date(2024, 3, 1));
    record(&db, user_id, Kind::Expense, "Housing", 800.0, date(2024, 3, 2));
    record(&db, user_id, Kind::Expense, "Groceries", 200.0, date(2024, 2, 10));

    let store = MemoryStore::with_transactions(vec![
        tx(1, Kind::Income, 2000.0, 1, "Salary", "2024-03-01"),
        tx(2, Kind::Expense, 800.0, 2, "Housing", "2024-03-02"),
        tx(3, Kind::Expense, 200.0, 3, "Groceries", "2024-02-10"),
    ]);

    let from_db = Aggregator::new(&db, user_id).with_today(today);
    let from_memory = Aggregator::new(&store, TEST_USER).with_today(today);

    let db_trends = from_db.monthly_trends(3).unwrap();
    let memory_trends = from_memory.monthly_trends(3).unwrap();
    assert_eq!(db_trends, memory_trends);
    assert_eq!(store.calls(), 3);

    let db_forecast = from_db.predict_next_month().unwrap().unwrap();
    let memory_forecast = from_memory.predict_next_month().unwrap().unwrap();
    assert_eq!(db_forecast, memory_forecast);
    assert_eq!(memory_forecast.based_on_months, 3);
}

#[test]
fn test_failing_store_degrades_advice() {
    let advisor = Advisor::new(&FailingStore, TEST_USER).with_today(date(2024, 6, 30));

    assert!(Aggregator::new(&FailingStore, TEST_USER)
        .monthly_trends(3)
        .is_err());
    assert!(matches!(
        advisor.spending_advice(),
        AdviceOutcome::Unavailable {
            topic: AdviceTopic::Spending,
            ..
        }
    ));
    assert!(matches!(
        advisor.savings_advice(3000.0),
        AdviceOutcome::Unavailable {
            topic: AdviceTopic::Savings,
            ..
        }
    ));
}
