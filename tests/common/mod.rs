#[macro_use]
pub mod harness;
