//! Sample catalog used to populate a development database.
//!
//! Seeding goes through [`CatalogService`] so sample rows pass the same
//! validations as any other record. A category that already exists (by
//! name, ignoring case) is skipped along with its products.

use common::AppResult;
use domain::{NewCategory, NewProduct};

use crate::service::CatalogService;

struct SampleProduct {
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    quantity: i32,
}

struct SampleCategory {
    name: &'static str,
    products: &'static [SampleProduct],
}

const SAMPLE_CATALOG: &[SampleCategory] = &[
    SampleCategory {
        name: "Apparel",
        products: &[
            SampleProduct {
                name: "Men's Classy shirt",
                description: "Button-down cotton shirt with a tailored fit.",
                price_cents: 6_499,
                quantity: 10,
            },
            SampleProduct {
                name: "Women's Zebra pants",
                description: "Striped trousers in a relaxed cut.",
                price_cents: 12_499,
                quantity: 18,
            },
            SampleProduct {
                name: "Hipster Hat",
                description: "Wool felt fedora.",
                price_cents: 3_449,
                quantity: 4,
            },
            SampleProduct {
                name: "Hipster Socks",
                description: "Patterned crew socks.",
                price_cents: 2_500,
                quantity: 8,
            },
        ],
    },
    SampleCategory {
        name: "Electronics",
        products: &[
            SampleProduct {
                name: "Modern Skateboards",
                description: "Electric longboard with a wireless remote.",
                price_cents: 16_400,
                quantity: 40,
            },
            SampleProduct {
                name: "Hotdog Slicer",
                description: "Countertop slicer for the serious griller.",
                price_cents: 2_650,
                quantity: 3,
            },
            SampleProduct {
                name: "World's Largest Smartwatch",
                description: "A watch you can read from across the room.",
                price_cents: 202_600,
                quantity: 0,
            },
        ],
    },
    SampleCategory {
        name: "Furniture",
        products: &[
            SampleProduct {
                name: "Optimal Sleeping Bed",
                description: "Queen bed frame with slatted base.",
                price_cents: 305_200,
                quantity: 320,
            },
            SampleProduct {
                name: "Red Bookshelf",
                description: "Five-shelf lacquered bookcase.",
                price_cents: 228_200,
                quantity: 23,
            },
        ],
    },
];

/// Counts of what a seeding run inserted or left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories_created: usize,
    pub categories_skipped: usize,
    pub products_created: usize,
}

/// Insert the sample catalog, skipping categories that already exist.
pub async fn seed_catalog(catalog: &dyn CatalogService) -> AppResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    for sample in SAMPLE_CATALOG {
        if catalog.find_category_by_name(sample.name).await?.is_some() {
            tracing::info!(category = sample.name, "Category exists, skipping");
            summary.categories_skipped += 1;
            continue;
        }

        let category = catalog.create_category(NewCategory::new(sample.name)).await?;
        summary.categories_created += 1;

        for product in sample.products {
            let new_product = NewProduct::new(
                product.name,
                product.price_cents,
                product.quantity,
                category.id,
            )
            .with_description(product.description);

            catalog.create_product(new_product).await?;
            summary.products_created += 1;
        }
    }

    tracing::info!(
        categories = summary.categories_created,
        products = summary.products_created,
        "Sample catalog seeded"
    );
    Ok(summary)
}
