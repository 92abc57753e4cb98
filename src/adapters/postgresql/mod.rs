//! PostgreSQL database integration
//!
//! This module provides the PostgreSQL backend for storing doctors and their
//! slots.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
pub use models::{DoctorRow, SlotRow};
