//! Wallet operations facade.
//!
//! The only surface the chat layer calls. Each operation is stateless
//! and independent; validation happens before any network access.

use rust_decimal::Decimal;

use crate::wallet::gateway::RpcGateway;
use crate::wallet::lamports;
use crate::wallet::transaction::TxBuilder;
use crate::wallet::types::{Keypair, Pubkey, WalletResult};

/// Facade over the amount converter, transaction builder, and gateway.
///
/// The gateway is injected at construction so callers (and tests) decide
/// what sits behind it.
#[derive(Debug, Clone)]
pub struct WalletClient<G: RpcGateway> {
    gateway: G,
}

impl<G: RpcGateway> WalletClient<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// The injected gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Balance of an address in SOL.
    pub async fn get_balance(&self, address: &Pubkey) -> WalletResult<Decimal> {
        let balance = self.gateway.fetch_balance(address).await?;
        Ok(lamports::to_sol(balance))
    }

    /// Submit a native-token transfer and return its signature.
    ///
    /// Amount and recipient are validated locally first, so no network
    /// resource is consumed on input errors. Exactly one submission is
    /// attempted; retry policy belongs to callers, not here.
    pub async fn transfer_funds(
        &self,
        sender: &Keypair,
        recipient: &str,
        amount: Decimal,
    ) -> WalletResult<String> {
        let amount_lamports = lamports::to_lamports(amount)?;
        let recipient: Pubkey = recipient.parse()?;

        let payload = TxBuilder::new(&self.gateway)
            .build(sender, &recipient, amount_lamports)
            .await?;
        let signature = self.gateway.send_transaction(&payload).await?;

        tracing::info!(
            from = %sender.pubkey(),
            to = %recipient,
            lamports = amount_lamports,
            signature = %signature,
            "Transfer submitted"
        );

        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::types::{Blockhash, WalletError};
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Double that counts network calls; used to prove validation
    /// happens first.
    struct CountingGateway {
        calls: AtomicUsize,
    }

    impl CountingGateway {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl RpcGateway for CountingGateway {
        async fn fetch_balance(&self, _address: &Pubkey) -> WalletResult<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }

        async fn latest_blockhash(&self) -> WalletResult<Blockhash> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Blockhash::new([0u8; 32]))
        }

        async fn send_transaction(&self, _payload: &[u8]) -> WalletResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("sig".to_string())
        }
    }

    fn test_keypair() -> Keypair {
        Keypair::from_hex(&hex::encode([5u8; 32])).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_amount_never_reaches_gateway() {
        let gateway = CountingGateway::new();
        let client = WalletClient::new(gateway);

        let result = client
            .transfer_funds(
                &test_keypair(),
                &Pubkey::new([1u8; 32]).to_string(),
                Decimal::ZERO,
            )
            .await;

        assert!(matches!(result, Err(WalletError::InvalidAmount(_))));
        assert_eq!(client.gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_recipient_never_reaches_gateway() {
        let gateway = CountingGateway::new();
        let client = WalletClient::new(gateway);

        let result = client
            .transfer_funds(
                &test_keypair(),
                "definitely-not-an-address",
                Decimal::from_str("1").unwrap(),
            )
            .await;

        assert!(matches!(result, Err(WalletError::InvalidRecipient(_))));
        assert_eq!(client.gateway.calls.load(Ordering::SeqCst), 0);
    }
}
