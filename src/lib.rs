// slotsync - Doctor Appointment Slot Synchronizer
// Copyright (c) 2025 slotsync Contributors
// Licensed under the MIT License

//! # slotsync - Doctor Appointment Slot Synchronizer
//!
//! slotsync pulls doctors and their appointment slots from a remote HTTP API
//! and merges them into a relational store.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** doctors and slots over HTTP Basic authenticated endpoints
//! - **Normalizing** doctor names, including `O'` surnames
//! - **Reconciling** the remote snapshot with stored doctors and slots
//! - **Committing** every change of a run in a single transaction
//!
//! ## Architecture
//!
//! slotsync follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (name normalization, synchronization)
//! - [`adapters`] - External integrations (doctors API, PostgreSQL, memory store)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use slotsync::adapters::doctors::HttpDoctorsSource;
//! use slotsync::adapters::store::create_store;
//! use slotsync::config::load_config;
//! use slotsync::core::sync::DoctorSlotsSynchronizer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("slotsync.toml")?;
//!
//!     let source = Arc::new(HttpDoctorsSource::new(&config.doctors_api)?);
//!     let store = create_store(&config)?;
//!     store.ensure_schema().await?;
//!
//!     let summary = DoctorSlotsSynchronizer::new(source, store)
//!         .synchronize()
//!         .await?;
//!
//!     println!("Synchronized {} doctors", summary.doctors_saved());
//!     Ok(())
//! }
//! ```
//!
//! ## Slot Staleness
//!
//! An existing slot only has its end time overwritten when it was created
//! more than [`domain::SLOT_STALENESS_MINUTES`] minutes ago. Running two
//! synchronizations back to back therefore leaves the first run's slots as
//! they are.
//!
//! ## Error Handling
//!
//! Library functions return [`domain::SyncError`]. A failed slot fetch only
//! flags the affected doctor; a failed doctor list or a failed commit ends
//! the run.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
