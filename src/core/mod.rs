//! Core business logic for slotsync.
//!
//! # Modules
//!
//! - [`naming`] - Doctor name normalization
//! - [`sync`] - Reconciliation of remote doctors and slots into the store
//!
//! # Synchronization Workflow
//!
//! 1. **Fetch doctors**: list every doctor from the remote API
//! 2. **Per doctor**: normalize the name, load or create the doctor, clear
//!    its error flag, then fetch and merge its slots
//! 3. **Stage**: queue the doctor for writing
//! 4. **Commit**: write every staged doctor in one store transaction
//!
//! # Example
//!
//! ```rust,no_run
//! use slotsync::adapters::doctors::HttpDoctorsSource;
//! use slotsync::adapters::store::create_store;
//! use slotsync::config::load_config;
//! use slotsync::core::sync::DoctorSlotsSynchronizer;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("slotsync.toml")?;
//!
//! let source = Arc::new(HttpDoctorsSource::new(&config.doctors_api)?);
//! let store = create_store(&config)?;
//!
//! let summary = DoctorSlotsSynchronizer::new(source, store)
//!     .synchronize()
//!     .await?;
//!
//! println!("Slots created: {}", summary.slots_created);
//! # Ok(())
//! # }
//! ```

pub mod naming;
pub mod sync;
