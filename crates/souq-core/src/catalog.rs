//! # Catalog Seed
//!
//! The store's opening stock. Loaded into a fresh inventory at startup
//! unless `seed_catalog = false`.
//!
//! The table carries three barcodes twice (`0012`, `0019`, `0020`): the
//! first entry wins and the later ones are counted as rejected, exactly as
//! any duplicate `Inventory::add` would be.

use serde::Serialize;
use tracing::debug;

use crate::error::CoreResult;
use crate::inventory::Inventory;
use crate::money::Money;
use crate::types::Product;
use crate::validation::parse_expiry;

/// One row of the seed table.
#[derive(Debug, Clone, Copy)]
pub struct SeedProduct {
    pub barcode: &'static str,
    pub name: &'static str,
    pub price_piastres: i64,
    pub stock: i64,
    pub expiry: &'static str,
    pub category: &'static str,
}

impl SeedProduct {
    const fn new(
        barcode: &'static str,
        name: &'static str,
        price_piastres: i64,
        stock: i64,
        expiry: &'static str,
        category: &'static str,
    ) -> Self {
        SeedProduct {
            barcode,
            name,
            price_piastres,
            stock,
            expiry,
            category,
        }
    }

    /// Builds the product record.
    pub fn to_product(&self) -> CoreResult<Product> {
        Ok(Product::new(
            self.barcode,
            self.name,
            Money::from_piastres(self.price_piastres),
            self.stock,
            self.category,
            parse_expiry(self.expiry)?,
        ))
    }
}

/// Outcome of seeding an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeedSummary {
    pub inserted: usize,
    pub rejected: usize,
}

#[rustfmt::skip]
pub const SEED_CATALOG: &[SeedProduct] = &[
    // Dairy
    SeedProduct::new("0001", "Milk 1L", 4500, 50, "2025-12-01", "Dairy"),
    SeedProduct::new("0008", "Cheese 200g", 12500, 35, "2026-02-01", "Dairy"),
    SeedProduct::new("0012", "Butter 250g", 17050, 30, "2026-04-01", "Dairy"),
    SeedProduct::new("0009", "Yogurt 150g", 4550, 80, "2026-03-01", "Dairy"),
    SeedProduct::new("0014", "Cream 200ml", 7099, 40, "2026-05-01", "Dairy"),
    SeedProduct::new("0028", "Ice Cream 500ml", 17250, 25, "2026-06-01", "Dairy"),
    // Meat
    SeedProduct::new("0006", "Chicken Breast 1kg", 18500, 25, "2025-12-15", "Meat"),
    SeedProduct::new("0015", "Ground Beef 500g", 25000, 20, "2025-12-10", "Meat"),
    SeedProduct::new("0016", "tuna 1kg", 28500, 15, "2025-12-20", "Meat"),
    SeedProduct::new("0024", "Salmon Fillet 500g", 49000, 10, "2025-12-18", "Meat"),
    SeedProduct::new("0025", "Turkey Slices 300g", 38000, 18, "2025-12-22", "Meat"),
    SeedProduct::new("0026", "Sausages 500g", 23000, 22, "2025-12-25", "Meat"),
    SeedProduct::new("0027", "Lamb Chops 500g", 28000, 8, "2025-12-30", "Meat"),
    // School
    SeedProduct::new("0017", "Notebook A4 120pg", 6090, 100, "2027-12-31", "School"),
    SeedProduct::new("0018", "Pen Blue Ink", 1000, 200, "2027-12-31", "School"),
    SeedProduct::new("0019", "Eraser", 500, 150, "2027-12-31", "School"),
    SeedProduct::new("0020", "Ruler 30cm", 2500, 80, "2027-12-31", "School"),
    SeedProduct::new("0021", "Backpack", 25000, 40, "2027-12-31", "School"),
    SeedProduct::new("0022", "Calculator", 150000, 60, "2027-12-31", "School"),
    SeedProduct::new("0023", "Highlighter Set", 3050, 70, "2027-12-31", "School"),
    // Produce
    SeedProduct::new("0004", "Apple 1kg", 8500, 20, "2025-11-30", "Produce"),
    SeedProduct::new("0012", "Lettuce", 1500, 50, "2025-11-28", "Produce"),
    SeedProduct::new("0019", "Carrots 1kg", 1500, 60, "2025-12-05", "Produce"),
    SeedProduct::new("0020", "Potatoes 2kg", 2500, 70, "2025-12-10", "Produce"),
    SeedProduct::new("0029", "Grapes 500g", 2800, 40, "2025-11-29", "Produce"),
    SeedProduct::new("0030", "Strawberries 250g", 3200, 30, "2025-11-27", "Produce"),
    SeedProduct::new("0031", "Cucumbers", 1200, 55, "2025-12-03", "Produce"),
    SeedProduct::new("0032", "Bell Peppers 1kg", 4000, 45, "2025-12-07", "Produce"),
    // Cleaning
    SeedProduct::new("0033", "Dish Soap 500ml", 8550, 80, "2027-12-31", "Cleaning"),
    SeedProduct::new("0034", "Laundry Detergent 1L", 5000, 60, "2027-12-31", "Cleaning"),
    SeedProduct::new("0035", "All-Purpose Cleaner 750ml", 3500, 70, "2027-12-31", "Cleaning"),
    SeedProduct::new("0036", "Sponges 5pc", 1800, 90, "2027-12-31", "Cleaning"),
    SeedProduct::new("0037", "Paper Towels 2rolls", 2200, 50, "2027-12-31", "Cleaning"),
    SeedProduct::new("0038", "Trash Bags 30pc", 4000, 40, "2027-12-31", "Cleaning"),
    // Beverages
    SeedProduct::new("0039", "Coffee 250g", 25000, 30, "2026-12-31", "Beverages"),
    SeedProduct::new("0040", "Tea Bags 100pc", 3000, 50, "2026-12-31", "Beverages"),
    SeedProduct::new("0041", "Soda 330ml", 1500, 70, "2025-12-31", "Beverages"),
    SeedProduct::new("0042", "Bottled Water 500ml", 800, 100, "2025-12-31", "Beverages"),
    SeedProduct::new("0043", "Energy Drink 250ml", 2000, 40, "2025-12-31", "Beverages"),
    // Snacks
    SeedProduct::new("0044", "Chips 200g", 2500, 60, "2026-06-30", "Snacks"),
    SeedProduct::new("0045", "Chocolate Bar 100g", 3000, 80, "2026-05-31", "Snacks"),
    SeedProduct::new("0046", "Cookies 150g", 2000, 70, "2026-07-15", "Snacks"),
    SeedProduct::new("0047", "Nuts chocolate Mix 250g", 4000, 50, "2026-08-31", "Snacks"),
    SeedProduct::new("0048", "Granola Bars 6pc", 5000, 90, "2026-09-30", "Snacks"),
    SeedProduct::new("0049", "Popcorn 100g", 1500, 100, "2026-04-30", "Snacks"),
    SeedProduct::new("0050", "Dried Fruit 200g", 7500, 40, "2026-10-31", "Snacks"),
    SeedProduct::new("0051", "Pretzels 150g", 1800, 75, "2026-11-30", "Snacks"),
    // Self Care
    SeedProduct::new("0052", "Shampoo 500ml", 20050, 60, "2027-12-31", "Self Care"),
    SeedProduct::new("0053", "Conditioner 400ml", 12000, 55, "2027-12-31", "Self Care"),
    SeedProduct::new("0054", "Body Wash 500ml", 8000, 70, "2027-12-31", "Self Care"),
    SeedProduct::new("0055", "Toothpaste 150g", 4500, 80, "2027-12-31", "Self Care"),
    SeedProduct::new("0056", "Deodorant 200ml", 8000, 50, "2027-12-31", "Self Care"),
    // Household
    SeedProduct::new("0057", "Toilet Paper 12rolls", 5000, 40, "2027-12-31", "Household"),
    SeedProduct::new("0058", "Facial Tissues 4packs", 3000, 70, "2027-12-31", "Household"),
    SeedProduct::new("0059", "Hand Soap 300ml", 3000, 90, "2027-12-31", "Household"),
    SeedProduct::new("0060", "Air Freshener 250ml", 4000, 50, "2027-12-31", "Household"),
    SeedProduct::new("0061", "Light Bulbs 2pc", 3500, 60, "2027-12-31", "Household"),
    SeedProduct::new("0062", "Batteries AA 4pc", 4000, 80, "2027-12-31", "Household"),
    SeedProduct::new("0063", "Extension Cord 3m", 700, 30, "2027-12-31", "Household"),
    // Food Staples
    SeedProduct::new("0064", "Pasta 500g", 4050, 70, "2027-12-31", "Food Staples"),
    SeedProduct::new("0065", "Canned Beans 400g", 2600, 80, "2027-12-31", "Food Staples"),
    SeedProduct::new("0066", "Canned Tuna 200g", 5000, 60, "2027-12-31", "Food Staples"),
    SeedProduct::new("0067", "Olive Oil 1L", 8000, 40, "2027-12-31", "Food Staples"),
    SeedProduct::new("0068", "Flour 1kg", 2500, 50, "2027-12-31", "Food Staples"),
    SeedProduct::new("0069", "Sugar 1kg", 2000, 60, "2027-12-31", "Food Staples"),
    SeedProduct::new("0070", "Salt 500g", 1000, 90, "2027-12-31", "Food Staples"),
    SeedProduct::new("0071", "Baking Powder 200g", 1800, 70, "2027-12-31", "Food Staples"),
    SeedProduct::new("0072", "Yeast 100g", 1500, 80, "2027-12-31", "Food Staples"),
    // Toys
    SeedProduct::new("0073", "Action Figure", 40000, 30, "2028-12-31", "Toys"),
    SeedProduct::new("0074", "Doll", 38000, 25, "2028-12-31", "Toys"),
    SeedProduct::new("0075", "Puzzle 500pc", 25000, 40, "2028-12-31", "Toys"),
    SeedProduct::new("0076", "Board Game", 15000, 20, "2028-12-31", "Toys"),
    SeedProduct::new("0077", "Remote Control Car", 25000, 15, "2028-12-31", "Toys"),
    SeedProduct::new("0101", "LEGO Building Blocks Set", 30000, 18, "2028-12-31", "Toys"),
    SeedProduct::new("0102", "Stuffed Animal", 12000, 50, "2028-12-31", "Toys"),
    // Electronics
    SeedProduct::new("0078", "Headphones", 60000, 20, "2028-12-31", "Electronics"),
    SeedProduct::new("0079", "Portable Charger 65W", 40000, 25, "2028-12-31", "Electronics"),
    SeedProduct::new("0080", "USB Flash Drive 128GB", 60000, 30, "2028-12-31", "Electronics"),
    SeedProduct::new("0081", "Wireless Mouse", 38000, 40, "2028-12-31", "Electronics"),
    SeedProduct::new("0082", "Keyboard", 18000, 35, "2028-12-31", "Electronics"),
    SeedProduct::new("0083", "Webcam", 40000, 15, "2028-12-31", "Electronics"),
    SeedProduct::new("0084", "Bluetooth Speaker", 35000, 20, "2028-12-31", "Electronics"),
    SeedProduct::new("0085", "Smartwatch", 150000, 10, "2028-12-31", "Electronics"),
    SeedProduct::new("0086", "Fitness Tracker", 50000, 15, "2028-12-31", "Electronics"),
    SeedProduct::new("0087", "E-reader", 38000, 8, "2028-12-31", "Electronics"),
    SeedProduct::new("0088", "Tablet", 870000, 12, "2028-12-31", "Electronics"),
    SeedProduct::new("0089", "Iphone 13 pro max", 3990000, 20, "2028-12-31", "Electronics"),
    SeedProduct::new("0090", "Laptop", 6999900, 10, "2028-12-31", "Electronics"),
    // Sports
    SeedProduct::new("0091", "Football", 38000, 25, "2027-12-31", "Sports"),
    SeedProduct::new("0092", "Basketball", 22000, 30, "2027-12-31", "Sports"),
    SeedProduct::new("0093", "Tennis Racket", 50000, 15, "2027-12-31", "Sports"),
    SeedProduct::new("0094", "Yoga Mat", 18000, 40, "2027-12-31", "Sports"),
    SeedProduct::new("0095", "Dumbbell Set", 72000, 10, "2027-12-31", "Sports"),
    SeedProduct::new("0096", "Jump Rope", 8000, 50, "2027-12-31", "Sports"),
    SeedProduct::new("0097", "Cycling Helmet", 45000, 20, "2027-12-31", "Sports"),
    // Bakery
    SeedProduct::new("0098", "Bagels 6pc", 3000, 40, "2025-10-05", "Bakery"),
    SeedProduct::new("0099", "Muffins", 4000, 35, "2025-10-03", "Bakery"),
    SeedProduct::new("0100", "Croissants 3pc", 3500, 30, "2025-10-04", "Bakery"),
    SeedProduct::new("0002", "Bread", 200, 100, "2025-10-01", "Bakery"),
    // Eggs
    SeedProduct::new("0003", "Eggs 12pc", 850, 30, "2026-01-01", "Eggs"),
    // Grains
    SeedProduct::new("0005", "Rice 1kg", 4000, 40, "2027-01-01", "Grains"),
    // Beverages
    SeedProduct::new("0007", "Orange Juice 1L", 6000, 60, "2025-12-20", "Beverages"),
    // Produce
    SeedProduct::new("0010", "Banana 1kg", 4500, 45, "2025-11-25", "Produce"),
    // Breakfast
    SeedProduct::new("0011", "Cereal 500g", 6550, 55, "2026-06-01", "Breakfast"),
    // Condiments
    SeedProduct::new("0013", "Tomato Sauce 500g", 1600, 70, "2027-05-01", "Condiments"),
];

/// Adds every seed row to `inventory`. Rows that fail (duplicate barcode,
/// bad data) are skipped silently and counted.
pub fn seed(inventory: &mut Inventory) -> SeedSummary {
    let mut summary = SeedSummary::default();

    for row in SEED_CATALOG {
        match row.to_product().and_then(|p| inventory.add(p)) {
            Ok(()) => summary.inserted += 1,
            Err(e) => {
                debug!(barcode = row.barcode, error = %e, "Seed row rejected");
                summary.rejected += 1;
            }
        }
    }

    summary
}
