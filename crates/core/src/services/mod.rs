//! Side-effecting services behind traits so frontends and tests can swap them.

pub mod api;
pub mod wallet;

pub use api::{HttpProsumerApi, ProsumerApi};
pub use wallet::{SimulatedWallet, WalletOperation, WalletService};
