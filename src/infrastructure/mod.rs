pub mod credentials;
pub mod http;
pub mod in_memory;
