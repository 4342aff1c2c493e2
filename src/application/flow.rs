use crate::domain::amount::{Amount, AmountInput};
use crate::domain::commission::{self, COMMISSION_RATE, CommissionSplit};
use crate::domain::ports::{CredentialSourceBox, PaymentGatewayBox};
use crate::domain::request::PaymentRequest;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Visible state of a [`PaymentRequestFlow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    /// Balance summary and the "Request Payment" trigger.
    #[default]
    Collapsed,
    /// The editable form.
    Expanded,
    /// A request is on the wire; submit is disabled.
    Submitting,
}

/// What the caller hands the flow about the contract being paid from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowConfig {
    pub contract_id: u64,
    /// Remaining funds; the upper bound for any single request.
    pub contract_balance: Decimal,
}

type Notify = Box<dyn FnMut() + Send>;

/// Collects, validates and submits one payment request at a time against a
/// contract balance.
///
/// The flow owns only its form fields. The contract balance stays the
/// caller's: after a successful submission `on_payment_requested` fires and
/// the caller is expected to refresh the balance with
/// [`set_contract_balance`](Self::set_contract_balance).
pub struct PaymentRequestFlow {
    config: FlowConfig,
    gateway: PaymentGatewayBox,
    credentials: CredentialSourceBox,
    on_payment_requested: Notify,
    state: FlowState,
    amount: String,
    description: String,
    error: Option<String>,
}

impl PaymentRequestFlow {
    pub fn new(
        config: FlowConfig,
        gateway: PaymentGatewayBox,
        credentials: CredentialSourceBox,
        on_payment_requested: impl FnMut() + Send + 'static,
    ) -> Self {
        Self {
            config,
            gateway,
            credentials,
            on_payment_requested: Box::new(on_payment_requested),
            state: FlowState::Collapsed,
            amount: String::new(),
            description: String::new(),
            error: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn contract_id(&self) -> u64 {
        self.config.contract_id
    }

    pub fn contract_balance(&self) -> Decimal {
        self.config.contract_balance
    }

    pub fn set_contract_balance(&mut self, balance: Decimal) {
        self.config.contract_balance = balance;
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the "Request Payment" trigger is enabled.
    pub fn can_open(&self) -> bool {
        self.state == FlowState::Collapsed && self.config.contract_balance > Decimal::ZERO
    }

    /// Expands the form. Fails with `NoBalance` when nothing is left to request.
    pub fn open(&mut self) -> Result<()> {
        if self.state != FlowState::Collapsed {
            return Ok(());
        }
        if self.config.contract_balance <= Decimal::ZERO {
            return Err(PaymentError::NoBalance);
        }
        self.state = FlowState::Expanded;
        self.error = None;
        Ok(())
    }

    /// Closes the form and forgets everything typed into it.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Field edits only land while the form is expanded.
    pub fn set_amount(&mut self, amount: impl Into<String>) {
        if self.state == FlowState::Expanded {
            self.amount = amount.into();
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        if self.state == FlowState::Expanded {
            self.description = description.into();
        }
    }

    /// The commission breakdown for the amount currently entered, if it is a
    /// positive number that fits a decimal. Recomputed on every call.
    pub fn preview(&self) -> Option<CommissionSplit> {
        match Amount::read(&self.amount) {
            Ok(AmountInput::Exact(amount)) => Some(commission::split(amount, COMMISSION_RATE)),
            _ => None,
        }
    }

    /// Whether the submit control is enabled. An amount above the balance
    /// still counts as submittable so the user gets the inline error.
    pub fn can_submit(&self) -> bool {
        self.state == FlowState::Expanded && Amount::read(&self.amount).is_ok()
    }

    /// Runs the local checks on the form without sending anything. A failure
    /// is recorded on the form the same way `submit` records it.
    pub fn validate(&mut self) -> Result<PaymentRequest> {
        let checked = match self.state {
            FlowState::Collapsed => Err(PaymentError::FormClosed),
            FlowState::Submitting => Err(PaymentError::SubmissionInFlight),
            FlowState::Expanded => PaymentRequest::validate(
                &self.amount,
                &self.description,
                self.config.contract_balance,
            ),
        };
        match checked {
            Ok(request) => {
                self.error = None;
                Ok(request)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Validates the form and, if it passes, sends a single request.
    ///
    /// Local failures (bad amount, balance exceeded, no credentials) never
    /// reach the gateway. A failure on an open form leaves it expanded with
    /// its values and an error message; success collapses and clears it and then
    /// fires `on_payment_requested` once.
    pub async fn submit(&mut self) -> Result<()> {
        let request = self.validate()?;
        let Some(token) = self.credentials.access_token() else {
            return Err(self.fail(PaymentError::Unauthenticated));
        };

        self.state = FlowState::Submitting;
        debug!(
            contract_id = self.config.contract_id,
            amount = %request.amount.value(),
            "submitting payment request"
        );

        let outcome = self
            .gateway
            .request_payment(self.config.contract_id, &request, &token)
            .await;

        match outcome {
            Ok(()) => {
                info!(
                    contract_id = self.config.contract_id,
                    amount = %request.amount.value(),
                    "payment requested"
                );
                self.reset();
                (self.on_payment_requested)();
                Ok(())
            }
            Err(e) => {
                self.state = FlowState::Expanded;
                Err(self.fail(e))
            }
        }
    }

    fn fail(&mut self, err: PaymentError) -> PaymentError {
        warn!(contract_id = self.config.contract_id, error = %err, "payment request failed");
        self.error = Some(err.to_string());
        err
    }

    fn reset(&mut self) {
        self.state = FlowState::Collapsed;
        self.amount.clear();
        self.description.clear();
        self.error = None;
    }
}
