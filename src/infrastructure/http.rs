use crate::domain::contract::ContractBalance;
use crate::domain::ports::{AccessToken, PaymentGateway};
use crate::domain::request::PaymentRequest;
use crate::error::{PaymentError, RemoteErrorKind, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

const PAYMENT_FALLBACK_MESSAGE: &str = "Failed to request payment";
const BALANCE_FALLBACK_MESSAGE: &str = "Failed to fetch balance information";

/// Shape of an error response from the API: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: serde_json::Value,
}

/// Talks to the marketplace REST API over HTTP.
///
/// Each call is a single attempt. No timeout is set on the requests; the
/// client passed in decides whether one applies.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpPaymentGateway {
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Builds a gateway with a default client from a base URL such as
    /// `https://api.example.com/api`.
    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self::new(reqwest::Client::new(), base_url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // `Url::join` would drop the last segment of a base without a trailing
    // slash (`/api`), so paths are appended textually.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

async fn failure(response: reqwest::Response, fallback: &str) -> PaymentError {
    let status = response.status().as_u16();
    match response.json::<ErrorBody>().await {
        Ok(body) => PaymentError::RemoteFailure {
            kind: RemoteErrorKind::from_status(status),
            status: Some(status),
            message: body
                .error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        },
        Err(e) => {
            warn!(status, error = %e, "unreadable error response");
            PaymentError::RemoteFailure {
                kind: RemoteErrorKind::Network,
                status: Some(status),
                message: PaymentError::NETWORK_MESSAGE.to_string(),
            }
        }
    }
}

fn transport(err: reqwest::Error) -> PaymentError {
    warn!(error = %err, "request did not complete");
    PaymentError::network()
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn request_payment(
        &self,
        contract_id: u64,
        request: &PaymentRequest,
        token: &AccessToken,
    ) -> Result<()> {
        let url = self.endpoint(&format!("contracts/{contract_id}/payments/"))?;
        debug!(%url, "POST payment request");

        let response = self
            .http
            .post(url)
            .bearer_auth(token.as_str())
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(failure(response, PAYMENT_FALLBACK_MESSAGE).await);
        }
        Ok(())
    }

    async fn contract_balance(
        &self,
        contract_id: u64,
        token: &AccessToken,
    ) -> Result<ContractBalance> {
        let url = self.endpoint(&format!("contracts/{contract_id}/balance/"))?;
        debug!(%url, "GET contract balance");

        let response = self
            .http
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(failure(response, BALANCE_FALLBACK_MESSAGE).await);
        }
        response.json().await.map_err(transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let gateway = HttpPaymentGateway::from_base_url(DEFAULT_API_URL).unwrap();
        assert_eq!(
            gateway.endpoint("contracts/5/payments/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/contracts/5/payments/"
        );

        let gateway = HttpPaymentGateway::from_base_url("https://example.com/api/").unwrap();
        assert_eq!(
            gateway.endpoint("contracts/5/balance/").unwrap().as_str(),
            "https://example.com/api/contracts/5/balance/"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            HttpPaymentGateway::from_base_url("not a url"),
            Err(PaymentError::ConfigError(_))
        ));
    }
}
