//! Leave Policy Engine
//!
//! This crate describes how leave types behave (accrual, expiry, monetization,
//! restrictions, applicability), derives employees' display balances from raw
//! ledgers, and validates leave and credit requests against those policies.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
