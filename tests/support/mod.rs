// tests/support/mod.rs
// Shared mocks and helpers for the integration test binaries. Individual
// test crates use different subsets, so allow the resulting dead_code
// warnings at the module level to keep CI output clean.
#[allow(dead_code, unused_imports)]
pub mod helpers;

#[allow(dead_code, unused_imports)]
pub mod mocks;

#[allow(unused_imports)]
pub use helpers::*;
#[allow(unused_imports)]
pub use mocks::*;
