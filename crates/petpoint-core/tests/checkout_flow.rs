//! Browse → cart → checkout flows across modules.

use chrono::{NaiveDate, TimeZone, Utc};
use petpoint_core::cart::{CartLedger, CartProduct};
use petpoint_core::checkout::{
    find_city, find_coupon, prepare_order, quote, City, CheckoutForm, Coupon, CouponDiscount,
};
use petpoint_core::money::Money;
use petpoint_core::navigation::{NavIntent, NavigationState, Screen};
use petpoint_core::promotions::{active_price, FlashSale};
use petpoint_core::types::{
    Animal, Category, CategoryKey, FoodParent, FoodSub, LocalizedText, Product,
};
use petpoint_core::CoreError;

fn catalog() -> Vec<Product> {
    let kibble = Product {
        id: "1".into(),
        name: LocalizedText::new("Cat Kibble 2kg", "طعام قطط جاف 2 كغم"),
        description: LocalizedText::default(),
        image_url: Some("https://cdn.example/kibble.png".to_string()),
        price: Money::from_dinars(1000),
        stock: 12,
        animal: Animal::Cats,
        category: CategoryKey::food(FoodSub::Kilograms),
    };
    let litter = Product {
        id: "2".into(),
        name: LocalizedText::new("Litter", "رمل"),
        description: LocalizedText::default(),
        image_url: None,
        price: Money::from_dinars(500),
        stock: 3,
        animal: Animal::Cats,
        category: CategoryKey::simple(Category::Clean),
    };
    vec![kibble, litter]
}

fn baghdad() -> City {
    City {
        id: "bgd".to_string(),
        name: "Baghdad".to_string(),
        name_ar: "بغداد".to_string(),
        fee: Money::from_dinars(3000),
        delivery_time: None,
        active: true,
        sort: 1,
    }
}

#[test]
fn drill_down_then_checkout() {
    let catalog = catalog();

    let state = [
        NavIntent::GoCategory { animal: Animal::Cats },
        NavIntent::GoProducts { animal: Animal::Cats, category: Category::Food },
        NavIntent::SelectFoodParent { parent: Some(FoodParent::Dry) },
        NavIntent::SelectFoodSub { sub: FoodSub::Kilograms },
    ]
    .into_iter()
    .fold(NavigationState::home(), |s, i| s.apply(i));

    assert_eq!(state.screen, Screen::Products);
    let (animal, key) = state.product_filter().unwrap();
    assert_eq!(key.to_string(), "dry.kilograms");

    let listed: Vec<&Product> = catalog
        .iter()
        .filter(|p| p.is_listed_under(animal, &key))
        .collect();
    assert_eq!(listed.len(), 1);

    let mut cart = CartLedger::new();
    let kibble = CartProduct::from_product(listed[0], listed[0].price);
    cart.add_to_cart(&kibble);
    cart.add_to_cart(&kibble);
    let litter = CartProduct::from_product(&catalog[1], catalog[1].price);
    for _ in 0..3 {
        cart.add_to_cart(&litter);
    }

    let cities = vec![baghdad()];
    let city = find_city(&cities, "Baghdad");
    assert_eq!(cart.subtotal().dinars(), 3500);
    assert_eq!(quote(&cart, city, None).total.dinars(), 6500);
    assert_eq!(cart.total(Money::from_dinars(3000)).dinars(), 6500);

    let form = CheckoutForm {
        customer_name: Some("Zahraa".to_string()),
        phone: "+964 770 123 4567".to_string(),
        city: Some("Baghdad".to_string()),
        address: Some("Mansour".to_string()),
        coupon_code: None,
    };
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let draft = prepare_order(&cart, &form, &cities, None, now).unwrap();

    assert_eq!(draft.total.dinars(), 6500);
    assert_eq!(draft.items[0].name.ar, "طعام قطط جاف 2 كغم");
    assert_eq!(draft.items[0].image.as_deref(), Some("https://cdn.example/kibble.png"));
    assert_eq!(draft.stock_decrements().len(), 2);

    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json["items"][1]["qty"], 3);
    assert_eq!(json["deliveryFee"], 3000);
}

#[test]
fn flash_price_is_frozen_at_first_add() {
    let catalog = catalog();
    let sale = FlashSale {
        id: "s1".to_string(),
        product_id: "1".into(),
        discount_percent: 20,
        start_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        end_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
    };

    let during = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap();

    let mut cart = CartLedger::new();
    let price = active_price(&catalog[0], std::slice::from_ref(&sale), during);
    cart.add_to_cart(&CartProduct::from_product(&catalog[0], price));

    let later = active_price(&catalog[0], std::slice::from_ref(&sale), after);
    assert_eq!(later.dinars(), 1000);
    cart.add_to_cart(&CartProduct::from_product(&catalog[0], later));

    assert_eq!(cart.quantity_of(&"1".into()), 2);
    assert_eq!(cart.subtotal().dinars(), 1600, "first-add snapshot wins");
}

#[test]
fn coupon_flow() {
    let coupons = vec![Coupon {
        id: "c1".to_string(),
        code: "EID25".to_string(),
        discount: CouponDiscount::Percent(25),
        expire_at: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        usage_limit: 100,
        used_count: 3,
    }];

    let mut cart = CartLedger::new();
    cart.add_to_cart(&CartProduct::new("1", "Kibble", Money::from_dinars(10_000)));

    let form = CheckoutForm {
        phone: "07701234567".to_string(),
        coupon_code: Some("eid25".to_string()),
        ..CheckoutForm::default()
    };
    let coupon = find_coupon(&coupons, form.coupon_code.as_deref().unwrap_or_default()).unwrap();

    let before_expiry = Utc.with_ymd_and_hms(2024, 5, 10, 23, 0, 0).unwrap();
    let draft = prepare_order(&cart, &form, &[], Some(coupon), before_expiry).unwrap();
    assert_eq!(draft.discount.dinars(), 2500);
    assert_eq!(draft.total.dinars(), 7500);
    assert_eq!(draft.coupon_code.as_deref(), Some("EID25"));

    let after_expiry = Utc.with_ymd_and_hms(2024, 5, 11, 0, 0, 1).unwrap();
    let err = prepare_order(&cart, &form, &[], Some(coupon), after_expiry).unwrap_err();
    assert!(matches!(err, CoreError::CouponExpired { .. }));
    assert_eq!(err.to_string(), "Coupon EID25 expired on 2024-05-10");
}

#[test]
fn checkout_after_back_navigation_keeps_cart() {
    let mut cart = CartLedger::new();
    cart.add_to_cart(&CartProduct::new("9", "Bird seed", Money::from_dinars(750)));

    let state = NavigationState::home()
        .goto_category(Animal::Birds)
        .goto_products(Animal::Birds, Category::Accessories)
        .back()
        .back();

    assert_eq!(state, NavigationState::home());
    assert_eq!(cart.subtotal().dinars(), 750);
}
