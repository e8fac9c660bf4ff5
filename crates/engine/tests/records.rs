use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, EngineError, PurchaseCmd, SaleCmd, UserRole};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

#[tokio::test]
async fn income_and_expense_collections_are_isolated() {
    let (engine, _db) = engine_with_db().await;

    engine
        .add_income_record(120.0, "sales", "morning cash", "alice")
        .await
        .unwrap();
    engine
        .add_expense_record(30.5, "rent", "", "alice")
        .await
        .unwrap();
    engine
        .add_income_record(80.0, "sales", "evening cash", "alice")
        .await
        .unwrap();

    let income = engine.daily_records("income", "alice").await.unwrap();
    assert_eq!(income.len(), 2);
    assert_eq!(income[0].description, "morning cash");
    assert_eq!(income[1].description, "evening cash");
    assert!(income.iter().all(|r| r.category == "sales"));

    let expense = engine.daily_records("expense", "alice").await.unwrap();
    assert_eq!(expense.len(), 1);
    assert_eq!(expense[0].amount, 30.5);
    assert_eq!(expense[0].description, "No description");
}

#[tokio::test]
async fn unknown_kind_reads_as_empty() {
    let (engine, _db) = engine_with_db().await;
    engine
        .add_income_record(10.0, "sales", "cash", "alice")
        .await
        .unwrap();

    assert!(engine.daily_records("Income", "alice").await.unwrap().is_empty());
    assert!(engine.daily_records("sales", "alice").await.unwrap().is_empty());
    assert!(engine.daily_records("", "alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn daily_record_validation_rejects_before_writing() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .add_income_record(0.0, "sales", "", "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_expense_record(f64::NAN, "rent", "", "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_expense_record(12.0, "   ", "", "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    assert!(engine.daily_records("income", "alice").await.unwrap().is_empty());
    assert!(engine.daily_records("expense", "alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_daily_records_clears_both_kinds_of_caller_only() {
    let (engine, _db) = engine_with_db().await;
    engine
        .add_income_record(10.0, "sales", "", "alice")
        .await
        .unwrap();
    engine
        .add_expense_record(4.0, "tea", "", "alice")
        .await
        .unwrap();
    engine
        .add_income_record(7.0, "sales", "", "bob")
        .await
        .unwrap();

    assert_eq!(engine.delete_daily_records("alice").await.unwrap(), 2);
    assert!(engine.daily_records("income", "alice").await.unwrap().is_empty());
    assert!(engine.daily_records("expense", "alice").await.unwrap().is_empty());
    assert_eq!(engine.daily_records("income", "bob").await.unwrap().len(), 1);

    // Already empty.
    assert_eq!(engine.delete_daily_records("alice").await.unwrap(), 0);
}

#[tokio::test]
async fn sale_total_is_quantity_times_unit_price() {
    let (engine, _db) = engine_with_db().await;

    let sale = engine
        .add_sale(SaleCmd::new("alice", "  cotton shirt ", 3, 0.1).customer_name("Bob"))
        .await
        .unwrap();
    assert_eq!(sale.item_name, "cotton shirt");
    assert_eq!(sale.quantity, 3);
    assert_eq!(sale.total_amount, 3.0 * 0.1);
    assert_eq!(sale.customer_name.as_deref(), Some("Bob"));

    let sales = engine.sales("alice").await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].item_name, sale.item_name);
    assert_eq!(sales[0].total_amount, sale.total_amount);
    assert_eq!(sales[0].customer_name, sale.customer_name);
}

#[tokio::test]
async fn optional_names_keep_absent_and_empty_apart() {
    let (engine, _db) = engine_with_db().await;

    engine
        .add_sale(SaleCmd::new("alice", "scarf", 1, 5.0))
        .await
        .unwrap();
    engine
        .add_sale(SaleCmd::new("alice", "scarf", 1, 5.0).customer_name(""))
        .await
        .unwrap();
    engine
        .add_purchase(PurchaseCmd::new("alice", "thread", 10, 0.25))
        .await
        .unwrap();
    engine
        .add_purchase(PurchaseCmd::new("alice", "thread", 10, 0.25).supplier_name(""))
        .await
        .unwrap();

    let sales = engine.sales("alice").await.unwrap();
    assert_eq!(sales[0].customer_name, None);
    assert_eq!(sales[1].customer_name, Some(String::new()));

    let purchases = engine.purchases("alice").await.unwrap();
    assert_eq!(purchases[0].supplier_name, None);
    assert_eq!(purchases[1].supplier_name, Some(String::new()));
}

#[tokio::test]
async fn purchase_total_and_validation() {
    let (engine, _db) = engine_with_db().await;

    let purchase = engine
        .add_purchase(PurchaseCmd::new("alice", "fabric", 7, 12.75).supplier_name("Acme"))
        .await
        .unwrap();
    assert_eq!(purchase.total_cost, 7.0 * 12.75);

    let err = engine
        .add_purchase(PurchaseCmd::new("alice", "fabric", 0, 12.75))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let err = engine
        .add_purchase(PurchaseCmd::new("alice", "fabric", 2, -1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_purchase(PurchaseCmd::new("alice", " ", 2, 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let err = engine
        .add_sale(SaleCmd::new("alice", "shirt", u64::MAX, 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    assert_eq!(engine.purchases("alice").await.unwrap().len(), 1);
    assert!(engine.sales("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn append_after_delete_appears_alone() {
    let (engine, _db) = engine_with_db().await;
    engine
        .add_sale(SaleCmd::new("alice", "shirt", 1, 10.0))
        .await
        .unwrap();
    engine
        .add_sale(SaleCmd::new("alice", "skirt", 2, 15.0))
        .await
        .unwrap();

    assert_eq!(engine.delete_sales("alice").await.unwrap(), 2);
    assert!(engine.sales("alice").await.unwrap().is_empty());

    engine
        .add_sale(SaleCmd::new("alice", "hat", 1, 8.0))
        .await
        .unwrap();
    let sales = engine.sales("alice").await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].item_name, "hat");

    assert_eq!(engine.delete_purchases("alice").await.unwrap(), 0);
}

#[tokio::test]
async fn collections_are_scoped_by_identity() {
    let (engine, _db) = engine_with_db().await;
    engine
        .add_sale(SaleCmd::new("alice", "shirt", 1, 10.0))
        .await
        .unwrap();

    assert!(engine.sales("bob").await.unwrap().is_empty());
    assert_eq!(engine.delete_sales("bob").await.unwrap(), 0);
    assert_eq!(engine.sales("alice").await.unwrap().len(), 1);
}

#[tokio::test]
async fn guests_cannot_touch_records() {
    let (engine, _db) = engine_with_db().await;
    engine.grant_role("mallory", UserRole::Guest).await.unwrap();

    let err = engine
        .add_income_record(10.0, "sales", "", "mallory")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine.sales("mallory").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine.delete_purchases("mallory").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn blank_identity_is_rejected() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.sales("  ").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}
