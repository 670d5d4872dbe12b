use boutique_core::{apply_view, Product, ProductList, Rating, SortMode};
use pretty_assertions::assert_eq;

fn product(id: u64, title: &str, price: f64, rate: f64) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        description: String::new(),
        category: "clothing".to_string(),
        image: String::new(),
        rating: Rating { rate, count: 5 },
    }
}

fn shirts() -> Vec<Product> {
    vec![
        product(1, "Red Shirt", 20.0, 4.1),
        product(2, "Blue Shirt", 10.0, 4.8),
        product(3, "Red Hat", 5.0, 3.9),
    ]
}

fn titles(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.title.as_str()).collect()
}

#[test]
fn search_then_sort_by_price() {
    let view = apply_view(&shirts(), "red", SortMode::PriceAsc);
    assert_eq!(titles(&view), vec!["Red Hat", "Red Shirt"]);
    assert_eq!(view[0].price, 5.0);
    assert_eq!(view[1].price, 20.0);
}

#[test]
fn search_is_case_insensitive_substring_on_title() {
    let view = apply_view(&shirts(), "SHIRT", SortMode::None);
    assert_eq!(titles(&view), vec!["Red Shirt", "Blue Shirt"]);
    assert!(apply_view(&shirts(), "socks", SortMode::None).is_empty());
}

#[test]
fn none_keeps_accumulated_order() {
    let view = apply_view(&shirts(), "", SortMode::None);
    assert_eq!(titles(&view), vec!["Red Shirt", "Blue Shirt", "Red Hat"]);
}

#[test]
fn price_descending_and_rating_descending() {
    let by_price = apply_view(&shirts(), "", SortMode::PriceDesc);
    assert_eq!(titles(&by_price), vec!["Red Shirt", "Blue Shirt", "Red Hat"]);

    let by_rating = apply_view(&shirts(), "", SortMode::RatingDesc);
    assert_eq!(titles(&by_rating), vec!["Blue Shirt", "Red Shirt", "Red Hat"]);
}

#[test]
fn ties_keep_fetch_order() {
    let products = vec![
        product(1, "A", 10.0, 4.0),
        product(2, "B", 5.0, 4.0),
        product(3, "C", 10.0, 4.0),
        product(4, "D", 5.0, 4.0),
    ];
    assert_eq!(
        titles(&apply_view(&products, "", SortMode::PriceAsc)),
        vec!["B", "D", "A", "C"]
    );
    assert_eq!(
        titles(&apply_view(&products, "", SortMode::PriceDesc)),
        vec!["A", "C", "B", "D"]
    );
    assert_eq!(
        titles(&apply_view(&products, "", SortMode::RatingDesc)),
        vec!["A", "B", "C", "D"]
    );
}

#[test]
fn apply_view_is_idempotent_and_does_not_touch_accumulated() {
    let mut list = ProductList::new(10);
    let request = list.load_initial();
    list.apply_page(&request, Ok(shirts()));

    let first = list.apply_view("red", SortMode::PriceAsc);
    let second = list.apply_view("red", SortMode::PriceAsc);
    assert_eq!(first, second);
    assert_eq!(list.products(), shirts().as_slice());

    list.set_search("red");
    list.set_sort(SortMode::PriceAsc);
    assert_eq!(list.displayed(), first);
}

#[test]
fn sort_labels_round_trip() {
    for mode in SortMode::ALL {
        assert_eq!(SortMode::from_label(mode.label()), Some(mode));
    }
    assert_eq!(SortMode::from_label("rating"), Some(SortMode::RatingDesc));
    assert_eq!(SortMode::from_label("cheapest"), None);
}
