//! Static item catalog consumed by the extraction pipeline.
//!
//! Base unit prices are the game's fixed per-item values; listings are
//! validated against them rather than against anything observed at runtime.

/// Empirical upper bound on plausible listing prices, expressed as a
/// multiple of `base_price * quantity`. The game caps asking prices at
/// this multiple; any OCR read above it is a misread, not a real ad.
pub const PRICE_CAP_FACTOR: f64 = 3.6;

#[derive(Debug, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: &'static str,
    pub base_price: u32,
}

impl CatalogItem {
    /// Fair price for a stack of `quantity` units.
    pub fn expected_price(&self, quantity: u32) -> u32 {
        self.base_price * quantity
    }

    /// Highest plausible asking price for a stack of `quantity` units.
    pub fn max_allowed_price(&self, quantity: u32) -> u32 {
        (self.base_price as f64 * quantity as f64 * PRICE_CAP_FACTOR) as u32
    }
}

/// Case-insensitive exact lookup by display name.
pub fn find(name: &str) -> Option<&'static CatalogItem> {
    ITEMS.iter().find(|item| item.name.eq_ignore_ascii_case(name))
}

macro_rules! item {
    ($name:expr, $price:expr) => {
        CatalogItem { name: $name, base_price: $price }
    };
}

pub static ITEMS: &[CatalogItem] = &[
    // Crops
    item!("Wheat", 1),
    item!("Corn", 2),
    item!("Carrot", 2),
    item!("Soybean", 3),
    item!("Sugarcane", 4),
    item!("Indigo", 7),
    item!("Cotton", 8),
    item!("Pumpkin", 9),
    item!("Potato", 11),
    item!("Chili Pepper", 12),
    item!("Tomato", 14),
    item!("Rice", 17),
    item!("Strawberry", 25),
    // Fruit
    item!("Apple", 11),
    item!("Raspberry", 13),
    item!("Cherry", 18),
    item!("Blackberry", 23),
    item!("Pineapple", 27),
    item!("Banana", 21),
    item!("Lemon", 19),
    // Animal goods
    item!("Egg", 5),
    item!("Milk", 9),
    item!("Bacon", 14),
    item!("Wool", 15),
    item!("Goat Milk", 24),
    item!("Honeycomb", 17),
    item!("Honey", 28),
    // Bakery
    item!("Bread", 6),
    item!("Corn Bread", 17),
    item!("Cookie", 16),
    item!("Raspberry Muffin", 22),
    item!("Blackberry Muffin", 34),
    item!("Carrot Cake", 21),
    item!("Cream Cake", 41),
    item!("Red Berry Cake", 67),
    // Sugar mill
    item!("Brown Sugar", 9),
    item!("White Sugar", 14),
    item!("Syrup", 22),
    // Popcorn pot
    item!("Popcorn", 8),
    item!("Buttered Popcorn", 19),
    item!("Chili Popcorn", 27),
    // Dairy
    item!("Cream", 14),
    item!("Butter", 23),
    item!("Cheese", 26),
    item!("Goat Cheese", 50),
    // Loom and sewing machine
    item!("Cotton Fabric", 17),
    item!("Sweater", 42),
    item!("Cotton Shirt", 30),
    item!("Wooly Chaps", 60),
    item!("Violet Dress", 69),
    // Barbecue grill
    item!("Pancake", 30),
    item!("Bacon and Eggs", 56),
    item!("Hamburger", 50),
    item!("Fish Burger", 65),
    // Pie oven
    item!("Carrot Pie", 64),
    item!("Pumpkin Pie", 70),
    item!("Bacon Pie", 76),
    item!("Apple Pie", 84),
    // Juice press
    item!("Carrot Juice", 25),
    item!("Apple Juice", 46),
    item!("Cherry Juice", 63),
    item!("Tomato Juice", 56),
];
