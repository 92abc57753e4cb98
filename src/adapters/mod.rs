//! External system integrations for slotsync.
//!
//! - [`doctors`] - Remote doctors API (trait-based source plus HTTP client)
//! - [`store`] - Storage abstraction, in-memory backend and factory
//! - [`postgresql`] - PostgreSQL backend
//!
//! # Doctors API
//!
//! ```rust,no_run
//! use slotsync::adapters::doctors::{DoctorsSource, HttpDoctorsSource};
//! use slotsync::config::{secret_string, DoctorsApiConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DoctorsApiConfig {
//!     base_url: "https://doctors.example.com".to_string(),
//!     username: "user".to_string(),
//!     password: secret_string("pass".to_string()),
//!     timeout_seconds: Some(30),
//!     tls_verify: true,
//! };
//!
//! let source = HttpDoctorsSource::new(&config)?;
//! let slots = source.fetch_doctor_slots(1).await?;
//! # Ok(())
//! # }
//! ```

pub mod doctors;
pub mod postgresql;
pub mod store;
