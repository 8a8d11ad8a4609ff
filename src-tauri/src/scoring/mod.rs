pub mod client;
pub mod presentation;
pub mod validation;
