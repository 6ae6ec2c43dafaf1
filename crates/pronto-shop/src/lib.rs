//! PRONTO Shop — catalog access, cart aggregation, and order
//! composition.
//!
//! Services are generic over the `pronto-core` repository traits and
//! perform every authorization check explicitly via
//! `pronto_auth::authorize` — each operation declares exactly which
//! roles it accepts.

pub mod cart;
pub mod catalog;
pub mod order;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use order::{OrderLine, OrderService};
