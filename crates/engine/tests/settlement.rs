use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, EngineError, UserRole};
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
async fn loan_lifecycle() {
    let (engine, _db) = engine_with_db().await;

    let loan = engine
        .add_supplier_loan(500.0, "Acme", "fabric advance", "alice")
        .await
        .unwrap();
    assert!(!loan.repaid);

    let loans = engine.supplier_loans("alice").await.unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].supplier_name, "Acme");
    assert_eq!(loans[0].purpose, "fabric advance");
    assert!(!loans[0].repaid);

    assert!(engine.repay_supplier_loan(0, "alice").await.unwrap());

    let loans = engine.supplier_loans("alice").await.unwrap();
    assert_eq!(loans.len(), 1);
    assert!(loans[0].repaid);
}

#[tokio::test]
async fn repay_twice_returns_true_then_false() {
    let (engine, _db) = engine_with_db().await;
    engine
        .add_supplier_loan(100.0, "Acme", "", "alice")
        .await
        .unwrap();

    assert!(engine.repay_supplier_loan(0, "alice").await.unwrap());
    assert!(!engine.repay_supplier_loan(0, "alice").await.unwrap());
    assert!(engine.supplier_loans("alice").await.unwrap()[0].repaid);
}

#[tokio::test]
async fn settle_out_of_range_mutates_nothing() {
    let (engine, _db) = engine_with_db().await;

    assert!(!engine.settle_advance_payment(0, "alice").await.unwrap());

    engine
        .add_advance_payment(250.0, "Looms Ltd", "", "alice")
        .await
        .unwrap();
    engine
        .add_advance_payment(75.0, "Looms Ltd", "buttons", "alice")
        .await
        .unwrap();

    assert!(!engine.settle_advance_payment(2, "alice").await.unwrap());
    assert!(!engine.settle_advance_payment(u64::MAX, "alice").await.unwrap());

    let payments = engine.advance_payments("alice").await.unwrap();
    assert_eq!(payments.len(), 2);
    assert!(payments.iter().all(|p| !p.settled));
}

#[tokio::test]
async fn settle_addresses_insertion_order() {
    let (engine, _db) = engine_with_db().await;
    for amount in [10.0, 20.0, 30.0] {
        engine
            .add_advance_payment(amount, "Looms Ltd", "", "alice")
            .await
            .unwrap();
    }

    assert!(engine.settle_advance_payment(1, "alice").await.unwrap());

    let payments = engine.advance_payments("alice").await.unwrap();
    let settled: Vec<_> = payments.iter().map(|p| p.settled).collect();
    assert_eq!(settled, vec![false, true, false]);
    assert_eq!(payments[1].amount, 20.0);
}

#[tokio::test]
async fn purposes_default_when_blank() {
    let (engine, _db) = engine_with_db().await;

    let loan = engine
        .add_supplier_loan(10.0, " Acme ", "  ", "alice")
        .await
        .unwrap();
    assert_eq!(loan.supplier_name, "Acme");
    assert_eq!(loan.purpose, "Personal use");

    let payment = engine
        .add_advance_payment(10.0, "Acme", "", "alice")
        .await
        .unwrap();
    assert_eq!(payment.purpose, "Advance payment");
}

#[tokio::test]
async fn liability_validation() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .add_supplier_loan(-5.0, "Acme", "", "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_advance_payment(5.0, "", "", "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    assert!(engine.supplier_loans("alice").await.unwrap().is_empty());
    assert!(engine.advance_payments("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn indices_restart_after_delete() {
    let (engine, _db) = engine_with_db().await;
    engine
        .add_supplier_loan(10.0, "Acme", "", "alice")
        .await
        .unwrap();
    engine
        .add_supplier_loan(20.0, "Acme", "", "alice")
        .await
        .unwrap();
    assert!(engine.repay_supplier_loan(0, "alice").await.unwrap());

    assert_eq!(engine.delete_supplier_loans("alice").await.unwrap(), 2);
    assert!(!engine.repay_supplier_loan(0, "alice").await.unwrap());

    engine
        .add_supplier_loan(30.0, "Acme", "", "alice")
        .await
        .unwrap();
    assert!(engine.repay_supplier_loan(0, "alice").await.unwrap());
    assert_eq!(engine.supplier_loans("alice").await.unwrap()[0].amount, 30.0);

    assert_eq!(engine.delete_advance_payments("alice").await.unwrap(), 0);
}

#[tokio::test]
async fn settlement_only_reaches_own_collection() {
    let (engine, _db) = engine_with_db().await;
    engine
        .add_supplier_loan(10.0, "Acme", "", "alice")
        .await
        .unwrap();

    assert!(!engine.repay_supplier_loan(0, "bob").await.unwrap());
    assert!(!engine.supplier_loans("alice").await.unwrap()[0].repaid);
}

#[tokio::test]
async fn guests_cannot_settle() {
    let (engine, _db) = engine_with_db().await;
    engine.grant_role("mallory", UserRole::Guest).await.unwrap();

    let err = engine.repay_supplier_loan(0, "mallory").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_repay_settles_exactly_once() {
    let (engine, _db) = engine_with_db().await;
    for i in 0..6 {
        engine
            .add_supplier_loan(100.0 + f64::from(i), "Acme", "", "alice")
            .await
            .unwrap();
    }
    let engine = Arc::new(engine);

    let first = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move { engine.repay_supplier_loan(5, "alice").await }
    });
    let second = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move { engine.repay_supplier_loan(5, "alice").await }
    });

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();
    assert!(first ^ second, "exactly one repayment must succeed");

    let loans = engine.supplier_loans("alice").await.unwrap();
    assert!(loans[5].repaid);
    assert!(loans[..5].iter().all(|l| !l.repaid));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_settlements_across_identities() {
    let (engine, _db) = engine_with_db().await;
    for user in ["alice", "bob"] {
        engine
            .add_advance_payment(50.0, "Acme", "", user)
            .await
            .unwrap();
    }
    let engine = Arc::new(engine);

    let handles: Vec<_> = ["alice", "bob"]
        .into_iter()
        .map(|user| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.settle_advance_payment(0, user).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }
}
