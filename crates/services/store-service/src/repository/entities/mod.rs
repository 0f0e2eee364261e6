//! SeaORM table models. Stores convert them into `domain` types before
//! returning.

pub mod category;
pub mod product;
pub mod user;
