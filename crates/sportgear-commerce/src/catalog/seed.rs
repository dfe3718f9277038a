//! The built-in SportGear catalog.

use crate::catalog::{Category, Product};
use crate::money::Money;

/// Brands offered by the store, in filter-sheet order.
pub const BRANDS: [&str; 6] = ["Wilson", "Spalding", "Nike", "Adidas", "Everlast", "Manduka"];

pub(crate) fn categories() -> Vec<Category> {
    vec![
        Category::all(),
        Category::new("basketball", "Basketball", "\u{1f3c0}"),
        Category::new("football", "Football", "\u{26bd}"),
        Category::new("tennis", "Tennis", "\u{1f3be}"),
        Category::new("boxing", "Boxing", "\u{1f94a}"),
        Category::new("yoga", "Yoga", "\u{1f9d8}"),
        Category::new("running", "Running", "\u{1f3c3}"),
    ]
}

pub(crate) fn products() -> Vec<Product> {
    vec![
        item("bb-001", "Pro Composite Basketball", "Spalding", "basketball", 4999)
            .with_rating(4.8, 1240)
            .with_description("Official size 7 composite leather ball with deep channels for grip indoors and out.")
            .with_ar(),
        item("bb-002", "Evolution Game Ball", "Wilson", "basketball", 6499)
            .with_rating(4.7, 982)
            .with_description("Microfiber composite cover with cushion core carcass for a soft, consistent feel."),
        item("fb-001", "Flight Match Football", "Nike", "football", 8999)
            .with_rating(4.6, 756)
            .with_description("Match ball with grooved casing for true flight and a 12-panel thermally bonded shell.")
            .with_ar(),
        item("fb-002", "Predator Training Ball", "Adidas", "football", 3499)
            .with_rating(4.5, 540)
            .with_description("Machine-stitched training ball built for repetition on grass and turf."),
        item("tn-001", "Pro Staff 97 Racket", "Wilson", "tennis", 19999)
            .with_rating(4.9, 412)
            .with_description("97 sq in braided graphite frame for precision and control at the baseline.")
            .with_ar(),
        item("tn-002", "Championship Tennis Balls (3-pack)", "Wilson", "tennis", 699)
            .with_rating(4.4, 2150)
            .with_description("Extra duty felt balls for hard courts, pressurized for consistent bounce."),
        item("bx-001", "Pro Style Training Gloves", "Everlast", "boxing", 3999)
            .with_rating(4.6, 1320)
            .with_description("Synthetic leather gloves with full-wrap hook-and-loop closure and mesh palm.")
            .with_ar(),
        item("bx-002", "Heavy Bag 70lb", "Everlast", "boxing", 14999)
            .with_rating(4.3, 287)
            .with_description("Filled heavy bag with nylon strap system for power and endurance work."),
        item("yg-001", "PRO Yoga Mat 6mm", "Manduka", "yoga", 12900)
            .with_rating(4.8, 860)
            .with_description("Dense-cushion mat with closed-cell surface that keeps sweat out.")
            .with_ar(),
        item("yg-002", "Cork Yoga Block", "Manduka", "yoga", 2400)
            .with_rating(4.5, 310)
            .with_description("Sustainably harvested cork block with rounded edges for support in every pose."),
        item("rn-001", "Pegasus Running Shoes", "Nike", "running", 13999)
            .with_rating(4.7, 1875)
            .with_description("Responsive daily trainer with a breathable mesh upper and reactive foam."),
        item("rn-002", "Ultraboost Running Shoes", "Adidas", "running", 18999)
            .with_rating(4.6, 1540)
            .with_description("Energy-returning midsole with a knit upper that adapts to your stride."),
    ]
}

fn item(id: &str, name: &str, brand: &str, category: &str, cents: i64) -> Product {
    Product::new(id, name, brand, category, Money::usd(cents))
        .with_image(format!("/images/products/{}.jpg", id))
}
