//! CBDC wallet access.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::{config::WalletConfig, error::WalletError};

/// Token movement requested from the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletOperation {
    /// Buy tokens with rupees.
    Buy,
    /// Redeem tokens to the registered VPA.
    Redeem,
}

impl WalletOperation {
    /// Toast shown when the operation succeeds.
    pub fn success_message(&self) -> &'static str {
        match self {
            WalletOperation::Buy => "Tokens purchased successfully",
            WalletOperation::Redeem => "Tokens redeemed successfully",
        }
    }
}

/// Opens the wallet app to perform a token operation.
#[async_trait]
pub trait WalletService: Send + Sync {
    /// Resolve `operation` for `amount` tokens.
    async fn connect(&self, operation: WalletOperation, amount: f64) -> Result<(), WalletError>;
}

/// Stand-in wallet that waits a fixed delay then succeeds at random.
pub struct SimulatedWallet {
    delay: Duration,
    success_rate: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedWallet {
    /// Wallet with explicit parameters. `success_rate` is clamped to `[0, 1]`.
    pub fn new(delay: Duration, success_rate: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            delay,
            success_rate: success_rate.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }

    /// Wallet built from configuration.
    pub fn from_config(config: &WalletConfig) -> Self {
        Self::new(config.delay(), config.success_rate, config.seed)
    }
}

#[async_trait]
impl WalletService for SimulatedWallet {
    async fn connect(&self, operation: WalletOperation, amount: f64) -> Result<(), WalletError> {
        tokio::time::sleep(self.delay).await;
        let success = self.rng.lock().random_bool(self.success_rate);
        info!(?operation, amount, success, "Simulated wallet call finished");
        if success {
            Ok(())
        } else {
            Err(WalletError::Unavailable)
        }
    }
}
