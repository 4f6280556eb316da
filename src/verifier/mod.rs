// src/verifier/mod.rs
mod checker;
mod result;

pub use checker::{classify, DeployVerifier, VerifierError};
pub use result::{CheckReport, CheckResult};
