//! Value types of a payment request and the ports the flow talks through.

pub mod amount;
pub mod commission;
pub mod contract;
pub mod ports;
pub mod request;
