#![forbid(unsafe_code)]

//! Core domain model and business logic for the clinic appointment system.
//!
//! This crate provides:
//! - Domain types (patients, practitioners, specialties, appointments, prescriptions)
//! - Specialty availability matching
//! - The clinic registry and per-patient clinical histories
//! - The scheduling engine and its thread-safe handle
//! - Configuration, logging setup, sample data and appointment export

pub mod types;
pub mod error;
pub mod availability;
pub mod history;
pub mod registry;
pub mod engine;
pub mod shared;
pub mod config;
pub mod logging;
pub mod sample;
pub mod export;

// Re-export commonly used types
pub use error::{Entity, Error, ErrorKind, Result};
pub use types::*;
pub use availability::{weekday_name, WEEKDAY_NAMES};
pub use history::ClinicalHistory;
pub use registry::ClinicRegistry;
pub use engine::SchedulingEngine;
pub use shared::SharedEngine;
pub use config::Config;
pub use sample::load_sample_data;
pub use export::{export_appointments, ExportFormat};
