// src/application/ports/mod.rs
pub mod gateway;
pub mod security;
pub mod time;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type BackendGatewayPort = dyn gateway::BackendGateway;
pub type TokenVerifierPort = dyn security::TokenVerifier;
pub type ClockPort = dyn time::Clock;
