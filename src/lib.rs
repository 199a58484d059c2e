//! Showroom - order-intake webhook receiver
//!
//! Accepts e-commerce order notifications, deduplicates them against an
//! append-only token ledger, issues showroom access tokens for eligible
//! orders, and emails the tokens to the buyer.

pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod intake;
pub mod models;
