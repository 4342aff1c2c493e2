use super::contract::ContractBalance;
use super::request::PaymentRequest;
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Bearer token used to authenticate against the marketplace API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// The remote side of a payment request.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Sends one payment request for `contract_id`. Success carries no data.
    async fn request_payment(
        &self,
        contract_id: u64,
        request: &PaymentRequest,
        token: &AccessToken,
    ) -> Result<()>;

    async fn contract_balance(&self, contract_id: u64, token: &AccessToken)
    -> Result<ContractBalance>;
}

/// Supplies the bearer token for outgoing requests.
pub trait CredentialSource: Send + Sync {
    /// `None` means the user is not signed in.
    fn access_token(&self) -> Option<AccessToken>;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type CredentialSourceBox = Box<dyn CredentialSource>;
