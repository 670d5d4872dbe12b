use boutique_core::{Favorites, Product, Rating};

fn product(id: u64) -> Product {
    Product {
        id,
        title: format!("Product {id}"),
        price: 1.0,
        description: String::new(),
        category: "jewelery".to_string(),
        image: String::new(),
        rating: Rating::default(),
    }
}

#[test]
fn duplicate_adds_are_ignored() {
    let mut favorites = Favorites::new();
    assert!(favorites.add_favorite(product(1)));
    assert!(!favorites.add_favorite(product(1)));
    assert_eq!(favorites.len(), 1);
}

#[test]
fn remove_missing_is_noop() {
    let mut favorites = Favorites::new();
    favorites.add_favorite(product(1));
    assert!(!favorites.remove_favorite(2));
    assert!(favorites.is_favorite(1));
}

#[test]
fn toggle_twice_restores_membership() {
    let mut favorites = Favorites::new();
    favorites.add_favorite(product(1));
    let before = favorites.clone();

    assert!(favorites.toggle_favorite(product(2)));
    assert!(favorites.is_favorite(2));
    assert!(!favorites.toggle_favorite(product(2)));
    assert_eq!(favorites, before);

    assert!(!favorites.toggle_favorite(product(1)));
    assert!(favorites.toggle_favorite(product(1)));
    assert!(favorites.is_favorite(1));
}

#[test]
fn insertion_order_is_preserved() {
    let mut favorites = Favorites::new();
    for id in [4, 2, 9] {
        favorites.add_favorite(product(id));
    }
    favorites.remove_favorite(2);
    favorites.add_favorite(product(2));

    let ids: Vec<_> = favorites.products().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![4, 9, 2]);
}
