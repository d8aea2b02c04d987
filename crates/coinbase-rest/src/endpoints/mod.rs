//! API endpoint implementations
//!
//! Each group builds endpoint paths, query parameters and bodies, then hands
//! a [`RequestSpec`](crate::RequestSpec) to the [`Dispatcher`](crate::Dispatcher).

pub mod accounts;
pub mod fees;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod users;
pub mod wallets;

pub use accounts::AccountEndpoints;
pub use fees::FeeEndpoints;
pub use orders::OrderEndpoints;
pub use products::ProductEndpoints;
pub use profiles::ProfileEndpoints;
pub use users::UserEndpoints;
pub use wallets::WalletEndpoints;
