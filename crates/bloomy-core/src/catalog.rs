//! # Seeded Catalog
//!
//! The flower catalog and the address book every fresh install starts with.
//!
//! The catalog is fixed at startup. Prices are stored as [`Money`]; the
//! legacy `"$45"` style labels are only accepted at the boundary through
//! [`Money::parse_label`].

use crate::money::Money;
use crate::types::{Address, AddressKind, Category, Product};

/// Asset key shared by every seeded product.
pub const DEFAULT_IMAGE: &str = "images/image.png";

struct Seed {
    id: &'static str,
    name: &'static str,
    price: i64,
    description: &'static str,
    categories: &'static [Category],
}

const SEEDS: [Seed; 10] = [
    Seed {
        id: "1",
        name: "Pink Roses Bouquet",
        price: 45,
        description: "A beautiful bouquet of fresh pink roses, perfect for expressing admiration and joy.",
        categories: &[Category::Roses, Category::Bouquets, Category::Anniversary],
    },
    Seed {
        id: "2",
        name: "Lavender Dreams",
        price: 38,
        description: "Calming lavender arrangements that bring a sense of peace and tranquility.",
        categories: &[Category::Bouquets],
    },
    Seed {
        id: "3",
        name: "White Tulips",
        price: 42,
        description: "Elegant white tulips symbolizing purity and forgiveness, ideal for new beginnings.",
        categories: &[Category::Bouquets],
    },
    Seed {
        id: "4",
        name: "Sunflower Joy",
        price: 35,
        description: "Bright and cheerful sunflowers guaranteed to bring a smile to anyone's face.",
        categories: &[Category::Birthday],
    },
    Seed {
        id: "5",
        name: "Red Velvet Roses",
        price: 50,
        description: "Classic deep red roses, the ultimate symbol of romantic love and passion.",
        categories: &[Category::Roses, Category::Anniversary],
    },
    Seed {
        id: "6",
        name: "Blush Hydrangeas",
        price: 40,
        description: "Voluminous blush pink hydrangeas representing heartfelt emotions and gratitude.",
        categories: &[Category::Birthday, Category::Bouquets],
    },
    Seed {
        id: "7",
        name: "Vibrant Orchids",
        price: 65,
        description: "Exotic and vibrant orchids that bring a touch of tropical elegance.",
        categories: &[Category::Anniversary],
    },
    Seed {
        id: "8",
        name: "Pastel Peonies",
        price: 55,
        description: "Delicate pastel peonies, perfect for expressing compassion and good fortune.",
        categories: &[Category::Bouquets, Category::Roses],
    },
    Seed {
        id: "9",
        name: "Sunny Daisies",
        price: 30,
        description: "A cheerful bunch of daisies to brighten up any room instantly.",
        categories: &[Category::Birthday],
    },
    Seed {
        id: "10",
        name: "Magnificent Lilies",
        price: 48,
        description: "Striking lilies that make a bold statement, representing rebirth and purity.",
        categories: &[Category::Bouquets, Category::Anniversary],
    },
];

/// The ten-product catalog, in display order.
pub fn seed_products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| Product {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            price: Money::from_major(seed.price),
            image: DEFAULT_IMAGE.to_string(),
            description: Some(seed.description.to_string()),
            categories: seed.categories.to_vec(),
        })
        .collect()
}

/// The address book of a fresh install: `Home` (default) and `Office`.
pub fn seed_addresses() -> Vec<Address> {
    vec![
        Address {
            id: "1".to_string(),
            title: "Home".to_string(),
            address: "123 Flower Street, Bloomingdale, NY 10001".to_string(),
            is_default: true,
            kind: AddressKind::Home,
        },
        Address {
            id: "2".to_string(),
            title: "Office".to_string(),
            address: "456 Tech Avenue, Future City, NY 10002".to_string(),
            is_default: false,
            kind: AddressKind::Office,
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let products = seed_products();
        let ids: HashSet<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(products.len(), 10);
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_prices_match_legacy_labels() {
        let labels = ["$45", "$38", "$42", "$35", "$50", "$40", "$65", "$55", "$30", "$48"];
        for (product, label) in seed_products().iter().zip(labels) {
            assert_eq!(Money::parse_label(label).unwrap(), product.price, "{}", product.name);
        }
    }

    #[test]
    fn test_every_product_has_a_category() {
        assert!(seed_products().iter().all(|p| !p.categories.is_empty()));
    }

    #[test]
    fn test_seed_addresses_have_one_default() {
        let addresses = seed_addresses();
        assert_eq!(addresses.iter().filter(|a| a.is_default).count(), 1);
        assert_eq!(addresses[1].kind, AddressKind::from_title(&addresses[1].title));
    }
}
