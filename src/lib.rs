// src/lib.rs
pub mod config;
pub mod report;
pub mod verifier;
