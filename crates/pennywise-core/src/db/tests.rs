//! Database tests

use chrono::NaiveDate;
use rusqlite::params;

use super::*;
use crate::analysis::{Advisor, Aggregator};
use crate::error::Error;
use crate::models::*;
use crate::store::FinanceStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup_user(db: &Database) -> i64 {
    db.create_user("alice", Some("alice@example.com")).unwrap()
}

fn category_id(db: &Database, user_id: i64, kind: Kind, name: &str) -> i64 {
    db.find_category(user_id, kind, name).unwrap().unwrap().id
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    assert!(db.find_user_by_name("nobody").unwrap().is_none());
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);

    let reopened = Database::new(db.path()).unwrap();
    assert!(reopened.get_user(user_id).unwrap().is_some());
}

#[test]
fn test_create_user_seeds_default_categories() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);

    let income = db.list_categories(user_id, Some(Kind::Income)).unwrap();
    let expense = db.list_categories(user_id, Some(Kind::Expense)).unwrap();
    assert_eq!(income.len(), DEFAULT_INCOME_CATEGORIES.len());
    assert_eq!(expense.len(), DEFAULT_EXPENSE_CATEGORIES.len());
    assert!(income.iter().all(|c| c.user_id == Some(user_id)));

    let all = db.list_categories(user_id, None).unwrap();
    assert_eq!(all.len(), income.len() + expense.len());
    assert_eq!(all[0].kind, Kind::Income);
}

#[test]
fn test_duplicate_username_rejected() {
    let db = Database::in_memory().unwrap();
    setup_user(&db);

    let err = db.create_user("alice", None).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
    assert!(matches!(
        db.create_user("   ", None).unwrap_err(),
        Error::InvalidData(_)
    ));
}

#[test]
fn test_set_monthly_income() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);

    db.set_monthly_income(user_id, 2500.0).unwrap();
    let user = db.find_user_by_name("alice").unwrap().unwrap();
    assert_eq!(user.monthly_income, 2500.0);

    assert!(db.set_monthly_income(user_id, -1.0).is_err());
    assert!(matches!(
        db.set_monthly_income(9999, 100.0).unwrap_err(),
        Error::NotFound(_)
    ));
}

#[test]
fn test_find_category_is_case_insensitive_and_kind_scoped() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);

    let income_other = db.find_category(user_id, Kind::Income, "other").unwrap().unwrap();
    let expense_other = db.find_category(user_id, Kind::Expense, "OTHER").unwrap().unwrap();
    assert_ne!(income_other.id, expense_other.id);
    assert!(db.find_category(user_id, Kind::Income, "Groceries").unwrap().is_none());
}

#[test]
fn test_add_and_list_transactions() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);
    let groceries = category_id(&db, user_id, Kind::Expense, "Groceries");
    let salary = category_id(&db, user_id, Kind::Income, "Salary");

    db.add_transaction(
        user_id,
        &NewTransaction::new(Kind::Income, 3000.0, salary, date(2024, 3, 1)),
    )
    .unwrap();
    db.add_transaction(
        user_id,
        &NewTransaction::new(Kind::Expense, 45.5, groceries, date(2024, 3, 4))
            .with_description("Weekly shop"),
    )
    .unwrap();

    let all = db.list_transactions(user_id, None, None).unwrap();
    assert_eq!(all.len(), 2);
    // Newest first
    assert_eq!(all[0].date, date(2024, 3, 4));
    assert_eq!(all[0].category_name, "Groceries");
    assert_eq!(all[0].category_color.as_deref(), Some("#F44336"));
    assert_eq!(all[0].description.as_deref(), Some("Weekly shop"));
    assert_eq!(all[0].kind, Kind::Expense);
    assert!(!all[0].is_template);

    let limited = db.list_transactions(user_id, None, Some(1)).unwrap();
    assert_eq!(limited.len(), 1);
}

#[test]
fn test_transaction_range_is_inclusive() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);
    let groceries = category_id(&db, user_id, Kind::Expense, "Groceries");

    for day in [1, 15, 31] {
        db.add_transaction(
            user_id,
            &NewTransaction::new(Kind::Expense, 10.0, groceries, date(2024, 1, day)),
        )
        .unwrap();
    }

    let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 15));
    assert_eq!(db.get_transactions(user_id, Some(range)).unwrap().len(), 2);
    assert_eq!(db.get_transactions(user_id, None).unwrap().len(), 3);
}

#[test]
fn test_add_transaction_validation() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);
    let groceries = category_id(&db, user_id, Kind::Expense, "Groceries");
    let today = date(2024, 3, 1);

    let zero = NewTransaction::new(Kind::Expense, 0.0, groceries, today);
    assert!(matches!(
        db.add_transaction(user_id, &zero).unwrap_err(),
        Error::InvalidData(_)
    ));

    let wrong_kind = NewTransaction::new(Kind::Income, 10.0, groceries, today);
    assert!(matches!(
        db.add_transaction(user_id, &wrong_kind).unwrap_err(),
        Error::InvalidData(_)
    ));

    let missing = NewTransaction::new(Kind::Expense, 10.0, 99_999, today);
    assert!(matches!(
        db.add_transaction(user_id, &missing).unwrap_err(),
        Error::NotFound(_)
    ));
}

#[test]
fn test_cannot_use_another_users_category() {
    let db = Database::in_memory().unwrap();
    let alice = setup_user(&db);
    let bob = db.create_user("bob", None).unwrap();
    let alice_groceries = category_id(&db, alice, Kind::Expense, "Groceries");

    let tx = NewTransaction::new(Kind::Expense, 10.0, alice_groceries, date(2024, 3, 1));
    assert!(matches!(
        db.add_transaction(bob, &tx).unwrap_err(),
        Error::InvalidData(_)
    ));
}

#[test]
fn test_system_default_category_visible_to_all_users() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);

    let conn = db.conn().unwrap();
    conn.execute(
        "INSERT INTO categories (name, kind, color, user_id) VALUES ('Gifts', 'income', NULL, NULL)",
        params![],
    )
    .unwrap();
    let gifts = conn.last_insert_rowid();
    drop(conn);

    db.add_transaction(
        user_id,
        &NewTransaction::new(Kind::Income, 50.0, gifts, date(2024, 3, 1)),
    )
    .unwrap();
    assert_eq!(db.list_categories(user_id, Some(Kind::Income)).unwrap().len(), 5);
}

#[test]
fn test_delete_transaction() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);
    let groceries = category_id(&db, user_id, Kind::Expense, "Groceries");
    let id = db
        .add_transaction(
            user_id,
            &NewTransaction::new(Kind::Expense, 10.0, groceries, date(2024, 3, 1)),
        )
        .unwrap();

    let other = db.create_user("bob", None).unwrap();
    assert!(matches!(
        db.delete_transaction(other, id).unwrap_err(),
        Error::NotFound(_)
    ));

    db.delete_transaction(user_id, id).unwrap();
    assert!(db.list_transactions(user_id, None, None).unwrap().is_empty());
    assert!(db.delete_transaction(user_id, id).is_err());
}

#[test]
fn test_templates_post_transactions() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);
    let housing = category_id(&db, user_id, Kind::Expense, "Housing");

    let template_id = db
        .add_template(
            user_id,
            &NewTemplate {
                name: "Rent".to_string(),
                amount: 900.0,
                category_id: housing,
                kind: Kind::Expense,
            },
        )
        .unwrap();

    let templates = db.list_templates(user_id).unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].category_name, "Housing");

    db.post_template(user_id, template_id, date(2024, 4, 1)).unwrap();
    let posted = db.list_transactions(user_id, None, None).unwrap();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].amount, 900.0);
    assert_eq!(posted[0].description.as_deref(), Some("Rent"));

    db.delete_template(user_id, template_id).unwrap();
    assert!(matches!(
        db.post_template(user_id, template_id, date(2024, 5, 1)).unwrap_err(),
        Error::NotFound(_)
    ));
}

#[test]
fn test_goals_only_grow() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);

    let goal_id = db
        .add_goal(
            user_id,
            &NewGoal {
                name: "Emergency fund".to_string(),
                target_amount: 1000.0,
                deadline: Some(date(2024, 12, 31)),
            },
        )
        .unwrap();

    let goal = db.add_goal_funds(user_id, goal_id, 400.0).unwrap();
    assert_eq!(goal.current_amount, 400.0);
    let goal = db.add_goal_funds(user_id, goal_id, 700.0).unwrap();
    assert_eq!(goal.current_amount, 1100.0);
    assert!(goal.progress(date(2024, 6, 1)).completed);

    assert!(db.add_goal_funds(user_id, goal_id, -50.0).is_err());
    assert!(db.add_goal_funds(user_id, goal_id, 0.0).is_err());
    assert_eq!(db.get_goal(goal_id).unwrap().unwrap().current_amount, 1100.0);
    assert!(matches!(
        db.add_goal_funds(user_id, 9999, 10.0).unwrap_err(),
        Error::NotFound(_)
    ));
}

#[test]
fn test_goal_funds_scoped_to_owner() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);
    let bob = db.create_user("bob", None).unwrap();

    let goal_id = db
        .add_goal(
            user_id,
            &NewGoal {
                name: "Bike".to_string(),
                target_amount: 500.0,
                deadline: None,
            },
        )
        .unwrap();

    assert!(matches!(
        db.add_goal_funds(bob, goal_id, 50.0).unwrap_err(),
        Error::NotFound(_)
    ));
    assert_eq!(db.get_goal(goal_id).unwrap().unwrap().current_amount, 0.0);

    let goal = db.add_goal_funds(user_id, goal_id, 50.0).unwrap();
    assert_eq!(goal.current_amount, 50.0);
}

#[test]
fn test_goal_validation_and_listing() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);

    let bad = NewGoal {
        name: "Car".to_string(),
        target_amount: 0.0,
        deadline: None,
    };
    assert!(db.add_goal(user_id, &bad).is_err());

    db.add_goal(
        user_id,
        &NewGoal {
            name: "Car".to_string(),
            target_amount: 5000.0,
            deadline: None,
        },
    )
    .unwrap();
    let trip = db
        .add_goal(
            user_id,
            &NewGoal {
                name: "Trip".to_string(),
                target_amount: 800.0,
                deadline: Some(date(2024, 8, 1)),
            },
        )
        .unwrap();

    let goals = db.list_goals(user_id).unwrap();
    assert_eq!(goals.len(), 2);
    // Goals with a deadline come first
    assert_eq!(goals[0].id, trip);
    assert_eq!(goals[0].deadline, Some(date(2024, 8, 1)));
    assert_eq!(goals[1].deadline, None);

    db.delete_goal(user_id, trip).unwrap();
    assert_eq!(db.list_goals(user_id).unwrap().len(), 1);
}

#[test]
fn test_monthly_summary_through_store() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);
    let salary = category_id(&db, user_id, Kind::Income, "Salary");
    let groceries = category_id(&db, user_id, Kind::Expense, "Groceries");

    let entries = [
        (Kind::Income, 2000.0, salary, date(2024, 12, 1)),
        (Kind::Expense, 300.0, groceries, date(2024, 12, 31)),
        (Kind::Expense, 999.0, groceries, date(2025, 1, 1)),
    ];
    for (kind, amount, category, day) in entries {
        db.add_transaction(user_id, &NewTransaction::new(kind, amount, category, day))
            .unwrap();
    }

    let summary = db.get_monthly_summary(user_id, 2024, 12).unwrap();
    assert_eq!(summary.income, 2000.0);
    assert_eq!(summary.expenses, 300.0);
    assert_eq!(summary.balance, 1700.0);
    assert_eq!(summary.transaction_count, 2);
}

#[test]
fn test_analysis_over_sqlite_store() {
    let db = Database::in_memory().unwrap();
    let user_id = setup_user(&db);
    let salary = category_id(&db, user_id, Kind::Income, "Salary");
    let housing = category_id(&db, user_id, Kind::Expense, "Housing");
    let groceries = category_id(&db, user_id, Kind::Expense, "Groceries");
    let today = date(2024, 6, 30);

    let entries = [
        (Kind::Income, 5000.0, salary, date(2024, 6, 1)),
        (Kind::Expense, 600.0, housing, date(2024, 6, 10)),
        (Kind::Expense, 400.0, groceries, date(2024, 6, 20)),
    ];
    for (kind, amount, category, day) in entries {
        db.add_transaction(user_id, &NewTransaction::new(kind, amount, category, day))
            .unwrap();
    }

    let aggregator = Aggregator::new(&db, user_id).with_today(today);
    let breakdown = aggregator
        .category_breakdown(date(2024, 6, 1), today)
        .unwrap();
    assert_eq!(breakdown.expenses_by_name()["Housing"], 600.0);
    assert_eq!(aggregator.monthly_trends(3).unwrap().len(), 3);

    let advice = Advisor::new(&db, user_id)
        .with_today(today)
        .spending_advice()
        .into_messages();
    assert_eq!(advice.len(), 1);
    assert!(advice[0].contains("60.0%"));
}
