//! Application layer: the payment request state machine.
//!
//! `PaymentRequestFlow` holds the form state for one contract and drives
//! validation and submission through the domain ports.

pub mod flow;
