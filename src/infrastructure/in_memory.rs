use crate::domain::contract::ContractBalance;
use crate::domain::ports::{AccessToken, PaymentGateway};
use crate::domain::request::PaymentRequest;
use crate::error::{PaymentError, RemoteErrorKind, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A payment request as it reached the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedRequest {
    pub contract_id: u64,
    pub request: PaymentRequest,
    pub token: AccessToken,
}

/// A gateway that keeps everything in memory.
///
/// Clones share state, so a test can hand one clone to a flow and inspect
/// what was submitted through another. Accepts every request until told to
/// reject.
#[derive(Default, Clone)]
pub struct InMemoryPaymentGateway {
    submitted: Arc<RwLock<Vec<SubmittedRequest>>>,
    rejection: Arc<RwLock<Option<(u16, String)>>>,
    balances: Arc<RwLock<HashMap<u64, ContractBalance>>>,
}

impl InMemoryPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every following request with `status` and the given error message.
    pub async fn reject_with(&self, status: u16, message: impl Into<String>) {
        *self.rejection.write().await = Some((status, message.into()));
    }

    pub async fn accept(&self) {
        *self.rejection.write().await = None;
    }

    pub async fn set_balance(&self, contract_id: u64, balance: ContractBalance) {
        self.balances.write().await.insert(contract_id, balance);
    }

    pub async fn submitted(&self) -> Vec<SubmittedRequest> {
        self.submitted.read().await.clone()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn request_payment(
        &self,
        contract_id: u64,
        request: &PaymentRequest,
        token: &AccessToken,
    ) -> Result<()> {
        // Record rejected attempts too: they still went "over the wire".
        self.submitted.write().await.push(SubmittedRequest {
            contract_id,
            request: request.clone(),
            token: token.clone(),
        });

        if let Some((status, message)) = self.rejection.read().await.clone() {
            return Err(PaymentError::RemoteFailure {
                kind: RemoteErrorKind::from_status(status),
                status: Some(status),
                message,
            });
        }
        Ok(())
    }

    async fn contract_balance(
        &self,
        contract_id: u64,
        _token: &AccessToken,
    ) -> Result<ContractBalance> {
        self.balances
            .read()
            .await
            .get(&contract_id)
            .cloned()
            .ok_or_else(|| PaymentError::RemoteFailure {
                kind: RemoteErrorKind::Rejected,
                status: Some(404),
                message: "Not found.".to_string(),
            })
    }
}
