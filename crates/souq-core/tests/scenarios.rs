//! End-to-end store scenarios driven through the `Supermarket` API.

use chrono::NaiveDate;
use souq_core::{
    CartUndo, CashierId, CoreError, CouponOutcome, Money, PaymentMethod, Product, StoreSettings,
    Supermarket,
};

// =============================================================================
// Helpers
// =============================================================================

fn empty_store(cashiers: usize) -> Supermarket {
    Supermarket::new(StoreSettings {
        cashier_count: cashiers,
        seed_catalog: false,
        ..Default::default()
    })
    .unwrap()
}

fn product(barcode: &str, name: &str, pounds: i64, stock: i64) -> Product {
    Product::new(
        barcode,
        name,
        Money::from_pounds(pounds, 0),
        stock,
        "Test",
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
    )
}

fn stock(store: &Supermarket, barcode: &str) -> i64 {
    store.inventory().get(barcode).unwrap().stock()
}

// =============================================================================
// Cart
// =============================================================================

#[test]
fn test_total_tracks_remaining_lines() {
    let mut store = empty_store(1);
    store.add_product(product("0001", "Milk 1L", 45, 50)).unwrap();
    store.add_product(product("0002", "Bread", 2, 100)).unwrap();
    store.register_walk_in("C1", "Mona").unwrap();

    store.add_to_cart("C1", "0001", 4).unwrap();
    store.add_to_cart("C1", "0002", 10).unwrap();
    store.remove_from_cart("C1", "0002", 3).unwrap();
    store.add_to_cart("C1", "0001", 1).unwrap();

    let cart = store.cart("C1").unwrap();
    let expected: Money = cart.items.iter().map(|i| i.line_total()).sum();
    assert_eq!(cart.total, expected);
    assert_eq!(cart.total, Money::from_pounds(5 * 45 + 7 * 2, 0));
}

#[test]
fn test_undo_is_inverse_of_last_add() {
    let mut store = empty_store(1);
    store.add_product(product("0001", "Milk 1L", 45, 50)).unwrap();
    store.register_walk_in("C1", "Mona").unwrap();
    store.add_to_cart("C1", "0001", 2).unwrap();

    let before = store.cart("C1").unwrap();
    let stock_before = stock(&store, "0001");

    store.add_to_cart("C1", "0001", 5).unwrap();
    store.undo_cart("C1").unwrap();

    let after = store.cart("C1").unwrap();
    assert_eq!(after.items, before.items);
    assert_eq!(stock(&store, "0001"), stock_before);
    assert_eq!(after.history_len, before.history_len);
}

#[test]
fn test_remove_more_than_held_returns_held() {
    let mut store = empty_store(1);
    store.add_product(product("0001", "Milk 1L", 45, 50)).unwrap();
    store.register_walk_in("C1", "Mona").unwrap();
    store.add_to_cart("C1", "0001", 3).unwrap();

    let change = store.remove_from_cart("C1", "0001", 8).unwrap();
    assert_eq!(change.quantity, 3);
    assert!(store.cart("C1").unwrap().items.is_empty());
    assert_eq!(stock(&store, "0001"), 50);
}

#[test]
fn test_stock_never_negative() {
    let mut store = empty_store(1);
    store.add_product(product("0001", "Milk 1L", 45, 4)).unwrap();
    store.register_walk_in("C1", "Mona").unwrap();

    let err = store.add_to_cart("C1", "0001", 5).unwrap_err();
    assert_eq!(
        err,
        CoreError::InsufficientStock {
            barcode: "0001".to_string(),
            available: 4,
            requested: 5,
        }
    );
    assert_eq!(stock(&store, "0001"), 4);
    assert!(store.cart("C1").unwrap().items.is_empty());
}

#[test]
fn test_second_coupon_always_fails() {
    let mut store = empty_store(1);
    store.add_product(product("0001", "Milk 1L", 45, 50)).unwrap();
    store.register_walk_in("C1", "Mona").unwrap();
    store.add_to_cart("C1", "0001", 10).unwrap();
    store.enqueue("C1").unwrap();

    let receipt = store.checkout(CashierId::Regular(0), Some("SAVE5")).unwrap();
    assert_eq!(receipt.coupon, CouponOutcome::Applied { code: "SAVE5".to_string() });

    let mut cart = souq_core::Cart::new();
    let milk = store.inventory().get("0001").unwrap().clone();
    cart.add_item(&milk, 10).unwrap();
    cart.apply_coupon("SAVE5").unwrap();
    let total = cart.total();
    assert!(matches!(
        cart.apply_coupon("BLACKFRIDAY"),
        Err(CoreError::CouponAlreadyApplied(_))
    ));
    assert_eq!(cart.total(), total);
}

#[test]
fn test_milk_scenario() {
    let mut store = empty_store(1);
    store.add_product(product("0001", "Milk 1L", 45, 50)).unwrap();
    store.register_walk_in("C1", "Mona").unwrap();

    store.add_to_cart("C1", "0001", 10).unwrap();
    assert_eq!(store.cart("C1").unwrap().total, Money::from_pounds(450, 0));
    assert_eq!(stock(&store, "0001"), 40);

    let mut cart = souq_core::Cart::new();
    let mut inventory = souq_core::inventory::Inventory::new();
    inventory.add(product("0001", "Milk 1L", 45, 50)).unwrap();
    let milk = inventory.get("0001").unwrap().clone();
    inventory.adjust_stock("0001", -10).unwrap();
    cart.add_item(&milk, 10).unwrap();

    cart.apply_coupon("SAVE5").unwrap();
    assert_eq!(cart.total(), Money::from_piastres(42750));

    // Undo reverses the ADD; the coupon stays.
    assert!(matches!(cart.undo(&mut inventory).unwrap(), CartUndo::Add { restored: 10, .. }));
    assert_eq!(cart.coupon().map(|c| c.code.as_str()), Some("SAVE5"));
    assert_eq!(inventory.get("0001").unwrap().stock(), 50);

    assert_eq!(cart.undo(&mut inventory), Err(CoreError::NoActionsToUndo));
}

// =============================================================================
// Routing
// =============================================================================

#[test]
fn test_walk_in_routes_to_shorter_queue() {
    let mut store = empty_store(2);
    for id in ["A", "B", "C"] {
        store.register_walk_in(id, "Shopper").unwrap();
    }
    // Build queue sizes {2, 0}: A → CASH1, B → CASH2, C → CASH1; then drain CASH2.
    store.enqueue("A").unwrap();
    store.enqueue("B").unwrap();
    store.enqueue("C").unwrap();
    let _ = store.checkout(CashierId::Regular(1), None);

    let status = store.cashier_status();
    assert_eq!(status[0].queue_len, 2);
    assert_eq!(status[1].queue_len, 0);

    store.register_walk_in("D", "Shopper").unwrap();
    assert_eq!(store.enqueue("D").unwrap(), CashierId::Regular(1));
}

#[test]
fn test_special_customers_use_special_till() {
    let mut store = empty_store(2);
    store.register_special("S1", "Karim").unwrap();
    assert_eq!(store.enqueue("S1").unwrap(), CashierId::SpecialNeeds);

    let status = store.cashier_status();
    assert_eq!(status.last().unwrap().queued, ["S1"]);
}

#[test]
fn test_online_orders_by_priority_then_arrival() {
    let mut store = empty_store(1);
    store.add_product(product("0001", "Milk 1L", 45, 50)).unwrap();
    for (id, priority) in [("O1", 5), ("O2", 1), ("O3", 5)] {
        store
            .register_online(id, id, "Cairo", PaymentMethod::Cash, Some(priority))
            .unwrap();
        store.add_to_cart(id, "0001", 1).unwrap();
        store.place_online_order(id).unwrap();
    }

    let served: Vec<String> = (0..3)
        .map(|_| store.checkout_online(None).unwrap().customer_id)
        .collect();
    assert_eq!(served, ["O2", "O1", "O3"]);
}

// =============================================================================
// Checkout pricing
// =============================================================================

#[test]
fn test_bulk_threshold_and_special_discount() {
    let mut store = empty_store(1);
    store.add_product(product("0500", "Bike", 1200, 5)).unwrap();
    store.register_walk_in("W", "Walk-in").unwrap();
    store.register_special("S", "Special").unwrap();

    store.add_to_cart("W", "0500", 1).unwrap();
    store.enqueue("W").unwrap();
    let walk_in = store.checkout(CashierId::Regular(0), None).unwrap();
    assert_eq!(walk_in.pricing.total, Money::from_pounds(1140, 0));

    store.add_to_cart("S", "0500", 1).unwrap();
    store.enqueue("S").unwrap();
    let special = store.checkout(CashierId::SpecialNeeds, None).unwrap();
    assert_eq!(
        special.pricing.subtotal - special.pricing.customer_discount,
        Money::from_pounds(1080, 0)
    );
    assert_eq!(special.pricing.total, Money::from_pounds(1026, 0));
}

// =============================================================================
// Sales ledger
// =============================================================================

#[test]
fn test_cashier_undo_histories_are_independent() {
    let mut store = empty_store(2);
    store.add_product(product("0001", "Milk 1L", 45, 50)).unwrap();
    store.register_walk_in("A", "A").unwrap();
    store.register_walk_in("B", "B").unwrap();

    store.add_to_cart("A", "0001", 1).unwrap();
    store.add_to_cart("B", "0001", 2).unwrap();
    store.enqueue("A").unwrap(); // CASH1
    store.enqueue("B").unwrap(); // CASH2
    let s1 = store.checkout(CashierId::Regular(0), None).unwrap().sale_id;
    let s2 = store.checkout(CashierId::Regular(1), None).unwrap().sale_id;

    let reversal = store.undo_sale(CashierId::Regular(0)).unwrap();
    assert_eq!(reversal.sale_id, s1);
    assert_eq!(stock(&store, "0001"), 48);

    let remaining: Vec<_> = store.ledger().recent().map(|s| s.id).collect();
    assert_eq!(remaining, [s2]);
    assert_eq!(
        store.undo_sale(CashierId::Regular(0)),
        Err(CoreError::NoSalesToUndo("CASH1".to_string()))
    );
}

#[test]
fn test_tally_reflects_captured_sales() {
    let mut store = empty_store(1);
    store.add_product(product("0001", "Milk 1L", 45, 50)).unwrap();
    store.add_product(product("0002", "Bread", 2, 100)).unwrap();
    for (id, milk, bread) in [("A", 1, 6), ("B", 4, 1)] {
        store.register_walk_in(id, id).unwrap();
        store.add_to_cart(id, "0001", milk).unwrap();
        store.add_to_cart(id, "0002", bread).unwrap();
        store.enqueue(id).unwrap();
        store.checkout(CashierId::Regular(0), None).unwrap();
    }

    let top: Vec<(String, i64)> = store
        .top_products(10)
        .into_iter()
        .map(|t| (t.barcode, t.quantity))
        .collect();
    assert_eq!(top, [("0002".to_string(), 7), ("0001".to_string(), 5)]);
}

#[test]
fn test_sale_ids_keep_increasing_after_undo() {
    let mut store = empty_store(1);
    store.add_product(product("0001", "Milk 1L", 45, 50)).unwrap();
    store.register_walk_in("A", "A").unwrap();

    let mut ids = Vec::new();
    for _ in 0..2 {
        store.add_to_cart("A", "0001", 1).unwrap();
        store.enqueue("A").unwrap();
        ids.push(store.checkout(CashierId::Regular(0), None).unwrap().sale_id);
        store.undo_sale(CashierId::Regular(0)).unwrap();
    }

    assert_eq!(ids[0].to_string(), "S1");
    assert_eq!(ids[1].to_string(), "S2");
    assert_eq!(stock(&store, "0001"), 50);
}
