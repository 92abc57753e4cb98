//! Status command implementation
//!
//! This module implements the `status` command for displaying stored doctors,
//! their slot counts and error flags.

use crate::adapters::store::create_store;
use crate::config::load_config;
use crate::domain::Doctor;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only show doctors whose last slot fetch failed
    #[arg(long)]
    pub errors_only: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking synchronization status");

        println!("📊 Synchronization Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2); // Configuration error exit code
            }
        };

        let store = match create_store(&config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to create store");
                println!("   Error: {}", e);
                return Ok(2); // Configuration error exit code
            }
        };

        let doctors = match store.list_doctors().await {
            Ok(d) => d,
            Err(e) => {
                println!("❌ Failed to load doctors");
                println!("   Error: {}", e);
                return Ok(4); // Connection error exit code
            }
        };

        if doctors.is_empty() {
            println!("No doctors stored yet.");
            println!("Run 'slotsync sync' to start synchronizing.");
            return Ok(0);
        }

        let shown = self.filter(&doctors);
        if shown.is_empty() {
            println!("No doctors match the specified filters.");
            return Ok(0);
        }

        println!("Found {} doctor(s):", shown.len());
        println!();
        println!(
            "{:<12} {:<40} {:<8} {:<25} {:<10}",
            "Doctor ID", "Name", "Slots", "Next Slot", "Status"
        );
        println!("{}", "-".repeat(100));

        for doctor in shown {
            let status = if doctor.has_error() {
                "❌ Error"
            } else {
                "✅ OK"
            };

            let next_slot = doctor
                .slots()
                .iter()
                .map(|s| s.start())
                .min()
                .map(|start| start.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());

            println!(
                "{:<12} {:<40} {:<8} {:<25} {:<10}",
                doctor.id().as_str(),
                doctor.name(),
                doctor.slots().len(),
                next_slot,
                status
            );
        }

        println!();
        Ok(0)
    }

    fn filter<'a>(&self, doctors: &'a [Doctor]) -> Vec<&'a Doctor> {
        doctors
            .iter()
            .filter(|d| !self.errors_only || d.has_error())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::DoctorId;

    #[test]
    fn test_errors_only_filter() {
        let mut failed = Doctor::new(DoctorId::from_remote(2), "Jane Smith");
        failed.mark_error();
        let doctors = vec![Doctor::new(DoctorId::from_remote(1), "John Doe"), failed];

        let args = StatusArgs { errors_only: true };
        let shown = args.filter(&doctors);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name(), "Jane Smith");

        let args = StatusArgs { errors_only: false };
        assert_eq!(args.filter(&doctors).len(), 2);
    }
}
