use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use storefront_catalog::{BrandDraft, CategoryDraft, ProductDraft, ProductPatch};
use storefront_core::repository::{BrandRepository, CategoryRepository, OrderRepository, ProductRepository};
use storefront_order::{
    ChangeError, ChangeHandler, Order, OrderStats, OrderStatus, OrderTab, PaymentMethod, PaymentStatus,
    PricingEngine, PricingError,
};
use storefront_shared::Currency;
use storefront_store::MemoryStore;
use uuid::Uuid;

struct Fixture {
    store: MemoryStore,
    shoes: Uuid,
    lamp: Uuid,
}

async fn fixture() -> Fixture {
    let store = MemoryStore::new();
    let category = store.categories().create(CategoryDraft::new("Home & Living")).await.unwrap();
    let brand = store.brands().create(BrandDraft::new("Acme")).await.unwrap();

    let products = store.products();
    let shoes = products
        .create(ProductDraft::new(category.id, brand.id, "Men's Shoes", dec!(499.00)))
        .await
        .unwrap();
    let lamp = products
        .create(ProductDraft::new(category.id, brand.id, "Desk Lamp", dec!(250.50)))
        .await
        .unwrap();

    Fixture { store, shoes: shoes.id, lamp: lamp.id }
}

#[tokio::test]
async fn test_compose_price_and_persist_order() {
    let f = fixture().await;
    let engine = PricingEngine::new(f.store.products());
    let mut order = Order::new(Uuid::new_v4(), PaymentMethod::Cod, Currency::Inr);

    let first = ChangeHandler::add_line(&mut order);
    ChangeHandler::select_product(&engine, &mut order, first, f.shoes).await.unwrap();
    ChangeHandler::set_quantity(&mut order, first, 3).unwrap();

    let second = ChangeHandler::add_line(&mut order);
    ChangeHandler::select_product(&engine, &mut order, second, f.lamp).await.unwrap();
    ChangeHandler::set_quantity(&mut order, second, 2).unwrap();

    assert_eq!(order.line(first).unwrap().total_amount(), dec!(1497.00));
    assert_eq!(order.line(second).unwrap().total_amount(), dec!(501.00));
    assert_eq!(order.grand_total_display(), "1998.00 INR");

    let orders = f.store.orders();
    orders.save(&order).await.unwrap();
    let stored = orders.get(order.id).await.unwrap().unwrap();

    let sum: Decimal = stored.lines().iter().map(|l| l.total_amount()).sum();
    assert_eq!(stored.grand_total(), sum);
    assert_eq!(stored.lines()[0].id(), first);
    assert_eq!(stored.lines()[1].id(), second);
}

#[tokio::test]
async fn test_catalog_price_change_does_not_reprice_saved_order() {
    let f = fixture().await;
    let engine = PricingEngine::new(f.store.products());
    let mut order = Order::new(Uuid::new_v4(), PaymentMethod::Stripe, Currency::Inr);

    let line = ChangeHandler::add_line(&mut order);
    ChangeHandler::select_product(&engine, &mut order, line, f.shoes).await.unwrap();
    f.store.orders().save(&order).await.unwrap();

    f.store
        .products()
        .update(f.shoes, ProductPatch { price: Some(Some(dec!(599.00))), ..Default::default() })
        .await
        .unwrap();

    let stored = f.store.orders().get(order.id).await.unwrap().unwrap();
    assert_eq!(stored.lines()[0].unit_amount(), dec!(499.00));
    assert_eq!(stored.grand_total_display(), "499.00 INR");

    // re-selecting picks up the new price
    let mut stored = stored;
    ChangeHandler::select_product(&engine, &mut stored, line, f.shoes).await.unwrap();
    assert_eq!(stored.grand_total_display(), "599.00 INR");
}

#[tokio::test]
async fn test_missing_product_leaves_order_untouched() {
    let f = fixture().await;
    let engine = PricingEngine::new(f.store.products());
    let mut order = Order::new(Uuid::new_v4(), PaymentMethod::Cod, Currency::Usd);

    let line = ChangeHandler::add_line(&mut order);
    ChangeHandler::select_product(&engine, &mut order, line, f.lamp).await.unwrap();
    let before = order.clone();

    let missing = Uuid::new_v4();
    let result = ChangeHandler::select_product(&engine, &mut order, line, missing).await;

    assert_eq!(result, Err(ChangeError::Pricing(PricingError::ProductNotFound(missing))));
    assert_eq!(order.lines(), before.lines());
    assert_eq!(order.grand_total(), before.grand_total());
}

#[tokio::test]
async fn test_dashboard_stats() {
    let f = fixture().await;
    let engine = PricingEngine::new(f.store.products());
    let orders = f.store.orders();

    for (status, product, quantity) in [
        (OrderStatus::New, f.shoes, 2),
        (OrderStatus::New, f.lamp, 4),
        (OrderStatus::Processing, f.lamp, 1),
        (OrderStatus::Shipped, f.shoes, 1),
    ] {
        let mut order = Order::new(Uuid::new_v4(), PaymentMethod::Cod, Currency::Inr);
        let line = ChangeHandler::add_line(&mut order);
        ChangeHandler::select_product(&engine, &mut order, line, product).await.unwrap();
        ChangeHandler::set_quantity(&mut order, line, quantity).unwrap();
        order.set_status(status);
        order.set_payment_status(PaymentStatus::Paid);
        orders.save(&order).await.unwrap();
    }

    let all = orders.list(OrderTab::All).await.unwrap();
    let stats = OrderStats::collect(&all, Currency::Inr).unwrap();

    assert_eq!(orders.count().await.unwrap(), 4);
    assert_eq!(stats.new_orders, 2);
    assert_eq!(stats.processing_orders, 1);
    assert_eq!(stats.shipped_orders, 1);
    // (998.00 + 1002.00 + 250.50 + 499.00) / 4
    assert_eq!(stats.average_grand_total, dec!(687.375));
    assert_eq!(stats.average_display(), "₹687.38");
}
