//! Executes reducer [`Command`]s against the injected services.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::{
    config::AppConfig,
    services::{HttpProsumerApi, ProsumerApi, SimulatedWallet, WalletService},
    state::{Action, Command},
};

/// Service handles shared by background tasks.
#[derive(Clone)]
pub struct Services {
    api: Arc<dyn ProsumerApi>,
    wallet: Arc<dyn WalletService>,
    support_url: String,
}

impl Services {
    /// Services with explicit implementations.
    pub fn new(
        api: Arc<dyn ProsumerApi>,
        wallet: Arc<dyn WalletService>,
        support_url: impl Into<String>,
    ) -> Self {
        Self {
            api,
            wallet,
            support_url: support_url.into(),
        }
    }

    /// HTTP backend and simulated wallet as configured.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api = HttpProsumerApi::new(&config.api_base_url, config.request_timeout())
            .context("failed to build backend client")?;
        let wallet = SimulatedWallet::from_config(&config.wallet);
        Ok(Self::new(Arc::new(api), Arc::new(wallet), config.support_url.clone()))
    }

    /// Link opened by the Support menu entry.
    pub fn support_url(&self) -> &str {
        &self.support_url
    }

    /// Run `command` to completion and return the action reporting its result.
    pub async fn execute(&self, command: Command) -> Option<Action> {
        match command {
            Command::RegisterProsumer(record) => {
                let result = self
                    .api
                    .register(&record)
                    .await
                    .map_err(|err| err.to_string());
                Some(Action::RegistrationFinished(result))
            }
            Command::ConnectWallet { operation, amount } => {
                let result = self.wallet.connect(operation, amount).await;
                Some(Action::WalletFinished { operation, result })
            }
            Command::OpenSupport => {
                let url = self.support_url.clone();
                let opened = tokio::task::spawn_blocking(move || open::that(&url)).await;
                match opened {
                    Ok(Ok(())) => {
                        info!(url = %self.support_url, "Opened support link");
                        None
                    }
                    Ok(Err(err)) => {
                        error!("Failed to open support link: {err}");
                        Some(Action::SupportLinkFailed(err.to_string()))
                    }
                    Err(err) => {
                        error!("Support link task failed: {err}");
                        Some(Action::SupportLinkFailed(err.to_string()))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{ApiError, WalletError},
        forms::ProsumerRecord,
        services::WalletOperation,
    };
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct FakeApi {
        fail: bool,
        received: Mutex<Vec<ProsumerRecord>>,
    }

    #[async_trait]
    impl ProsumerApi for FakeApi {
        async fn register(&self, record: &ProsumerRecord) -> Result<(), ApiError> {
            self.received.lock().push(record.clone());
            if self.fail {
                Err(ApiError::Status {
                    status: 503,
                    body: String::new(),
                })
            } else {
                Ok(())
            }
        }
    }

    struct FakeWallet {
        outcome: Result<(), WalletError>,
        calls: Mutex<Vec<(WalletOperation, f64)>>,
    }

    #[async_trait]
    impl WalletService for FakeWallet {
        async fn connect(&self, operation: WalletOperation, amount: f64) -> Result<(), WalletError> {
            self.calls.lock().push((operation, amount));
            self.outcome.clone()
        }
    }

    fn build(api: Arc<FakeApi>, outcome: Result<(), WalletError>) -> (Services, Arc<FakeWallet>) {
        let wallet = Arc::new(FakeWallet {
            outcome,
            calls: Mutex::new(Vec::new()),
        });
        (Services::new(api, wallet.clone(), "https://example.invalid"), wallet)
    }

    #[tokio::test]
    async fn registration_result_becomes_action() {
        let api = Arc::new(FakeApi::default());
        let (services, _) = build(api.clone(), Ok(()));
        let record = ProsumerRecord {
            first_name: "Asha".to_string(),
            ..ProsumerRecord::default()
        };

        let action = services.execute(Command::RegisterProsumer(record)).await;
        assert_eq!(action, Some(Action::RegistrationFinished(Ok(()))));
        assert_eq!(api.received.lock()[0].first_name, "Asha");

        let failing = Arc::new(FakeApi {
            fail: true,
            ..FakeApi::default()
        });
        let (services, _) = build(failing, Ok(()));
        let action = services
            .execute(Command::RegisterProsumer(ProsumerRecord::default()))
            .await;
        assert!(matches!(action, Some(Action::RegistrationFinished(Err(_)))));
    }

    #[tokio::test]
    async fn wallet_result_becomes_action() {
        let (services, wallet) = build(Arc::new(FakeApi::default()), Err(WalletError::Unavailable));
        let action = services
            .execute(Command::ConnectWallet {
                operation: WalletOperation::Redeem,
                amount: 12.5,
            })
            .await;
        assert_eq!(
            action,
            Some(Action::WalletFinished {
                operation: WalletOperation::Redeem,
                result: Err(WalletError::Unavailable),
            })
        );
        assert_eq!(wallet.calls.lock().as_slice(), &[(WalletOperation::Redeem, 12.5)]);
    }

    #[test]
    fn from_config_uses_configured_support_link() -> Result<()> {
        let services = Services::from_config(&AppConfig::default())?;
        assert_eq!(services.support_url(), "https://wa.me/918861289233");
        Ok(())
    }
}
