//! End-to-end register scenarios against an in-memory store.

use heladeria::{Application, CustomerPatch, DateBasis, ErrorKind, Money};
use heladeria_db::{Database, DbConfig};

async fn register() -> Application {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    Application::with_database(db, DateBasis::Utc)
}

#[tokio::test]
async fn vanilla_cone_sale_shows_in_daily_total() {
    let app = register().await;

    let cone = app
        .catalog()
        .add("Vanilla Cone", Some("Cones"), 2.50)
        .await
        .unwrap();
    let sale = app.ledger().sell(cone.id, 3).await.unwrap();

    assert_eq!(sale.total_price, Money::from_cents(750));
    assert_eq!(sale.quantity, 3);
    assert_eq!(app.ledger().daily_total_today().await.unwrap().to_string(), "$7.50");
}

#[tokio::test]
async fn two_sales_on_the_same_day_add_up() {
    let app = register().await;

    let cone = app.catalog().add("Vanilla Cone", Some("Cones"), 2.50).await.unwrap();
    let cup = app.catalog().add("Medium Cup", Some("Cups"), 4.25).await.unwrap();

    app.ledger().sell(cone.id, 2).await.unwrap();
    app.ledger().sell(cup.id, 1).await.unwrap();

    let report = app
        .ledger()
        .close_register(app.ledger().today())
        .await
        .unwrap();
    assert_eq!(report.sale_count, 2);
    assert_eq!(report.total.cents(), 925);
}

#[tokio::test]
async fn patching_phone_keeps_name_and_address() {
    let app = register().await;

    let ana = app
        .customers()
        .add("Ana Torres", Some("Calle Luna 12"), Some("555-0101"))
        .await
        .unwrap();

    app.customers()
        .patch(ana.id, CustomerPatch::new().phone("555-0199"))
        .await
        .unwrap();

    let stored = app.customers().get(ana.id).await.unwrap();
    assert_eq!(stored.name, "Ana Torres");
    assert_eq!(stored.address.as_deref(), Some("Calle Luna 12"));
    assert_eq!(stored.phone.as_deref(), Some("555-0199"));
}

#[tokio::test]
async fn price_change_does_not_rewrite_past_sales() {
    let app = register().await;

    let cone = app.catalog().add("Vanilla Cone", None, 2.50).await.unwrap();
    app.ledger().sell(cone.id, 3).await.unwrap();

    app.catalog()
        .update(cone.id, "Vanilla Cone", None, 3.00)
        .await
        .unwrap();
    app.ledger().sell(cone.id, 1).await.unwrap();

    let totals: Vec<i64> = app
        .ledger()
        .list()
        .await
        .unwrap()
        .iter()
        .map(|s| s.total_price.cents())
        .collect();
    assert_eq!(totals, vec![750, 300]);
}

#[tokio::test]
async fn selling_unknown_product_is_not_found_and_writes_nothing() {
    let app = register().await;

    let err = app.ledger().sell(12, 1).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(err.is_recoverable());
    assert!(app.ledger().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn checkout_with_change_and_short_payment() {
    let app = register().await;
    let split = app.catalog().add("Banana Split", Some("Specials"), 6.95).await.unwrap();

    let short = app
        .ledger()
        .checkout(split.id, 2, Money::from_cents(1000))
        .await
        .unwrap_err();
    assert_eq!(short.kind, ErrorKind::Validation);
    assert_eq!(app.ledger().count().await.unwrap(), 0);

    let receipt = app
        .ledger()
        .checkout(split.id, 2, Money::from_cents(2000))
        .await
        .unwrap();
    assert_eq!(receipt.sale.total_price.cents(), 1390);
    assert_eq!(receipt.change.cents(), 610);
}

#[tokio::test]
async fn deleting_a_sold_product_keeps_its_sales() {
    let app = register().await;

    let cone = app.catalog().add("Vanilla Cone", None, 2.50).await.unwrap();
    app.ledger().sell(cone.id, 2).await.unwrap();

    app.catalog().delete(cone.id).await.unwrap();

    assert_eq!(app.catalog().get(cone.id).await.unwrap_err().kind, ErrorKind::NotFound);
    assert_eq!(app.ledger().list().await.unwrap().len(), 1);
    assert_eq!(app.ledger().daily_total_today().await.unwrap().cents(), 500);

    let next = app.catalog().add("Chocolate Cone", None, 2.50).await.unwrap();
    assert!(next.id > cone.id);
}

#[tokio::test]
async fn sub_cent_price_times_quantity_is_exact() {
    let app = register().await;

    let topping = app.catalog().add("Topping", None, 0.125).await.unwrap();
    let sale = app.ledger().sell(topping.id, 8).await.unwrap();

    assert_eq!(sale.total_price, Money::from_cents(100));
    assert_eq!(app.ledger().daily_total_today().await.unwrap().to_string(), "$1.00");
}

#[tokio::test]
async fn huge_sale_is_refused_and_the_ledger_still_reads() {
    let app = register().await;

    let cone = app.catalog().add("Vanilla Cone", None, 2.50).await.unwrap();
    app.ledger().sell(cone.id, 1).await.unwrap();

    let err = app
        .ledger()
        .sell(cone.id, 100_000_000_000_000)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    assert_eq!(app.ledger().list().await.unwrap().len(), 1);
    assert_eq!(app.ledger().daily_total_today().await.unwrap().cents(), 250);
    let report = app
        .ledger()
        .close_register(app.ledger().today())
        .await
        .unwrap();
    assert_eq!(report.sale_count, 1);
}

#[tokio::test]
async fn empty_day_reports_zero() {
    let app = register().await;

    let report = app
        .ledger()
        .close_register(app.ledger().today())
        .await
        .unwrap();

    assert_eq!(report.sale_count, 0);
    assert!(report.total.is_zero());
    assert!(report.to_string().ends_with(": $0.00 (0 sales)"));
}

#[tokio::test]
async fn run_reports_today_from_a_configured_file() {
    let path = std::env::temp_dir().join(format!("heladeria-run-{}.db", uuid::Uuid::new_v4()));
    let mut config = heladeria::AppConfig::default();
    config.store.path = Some(path.clone());

    let report = heladeria::run(&config).await.unwrap();
    assert_eq!(report.sale_count, 0);

    // The first run created the tables; the second opens them as-is
    let again = heladeria::run(&config).await.unwrap();
    assert_eq!(again, report);

    let _ = std::fs::remove_file(&path);
}
