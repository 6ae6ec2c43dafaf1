//! SurrealDB repository implementations.

mod cart;
mod order;
mod pizza;
mod user;

pub use cart::SurrealCartRepository;
pub use order::SurrealOrderRepository;
pub use pizza::SurrealPizzaRepository;
pub use user::SurrealUserRepository;
