// Pricing & Offer Calculation Engine
//
// Turns cart lines into priced lines: promotion selection, discount math,
// unit-price lookup, per-line failure isolation, and cart totaling. All
// reads go through the CatalogStore seam and take no locks; prices quoted
// here may be stale by the time an order is committed.

pub mod calculator;
pub mod error;
pub mod handlers;
pub mod line_pricer;
pub mod models;
pub mod price_lookup;
pub mod resolver;
pub mod store;
pub mod strategy;

pub use calculator::*;
pub use error::*;
pub use handlers::*;
pub use line_pricer::*;
pub use models::*;
pub use price_lookup::*;
pub use resolver::*;
pub use store::*;
pub use strategy::*;
