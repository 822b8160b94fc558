//! Error types for the clinica_core library.

use chrono::NaiveDateTime;
use std::fmt;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Which directory an identifier was looked up in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    Patient,
    Practitioner,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Patient => write!(f, "patient"),
            Entity::Practitioner => write!(f, "practitioner"),
        }
    }
}

/// Core error type for clinica_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field was empty
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Duplicate national ID or license ID
    #[error("The {entity} {id} is already registered")]
    AlreadyRegistered { entity: Entity, id: String },

    /// Unknown national ID or license ID
    #[error("No {entity} registered with identifier {id}")]
    NotFound { entity: Entity, id: String },

    /// The practitioner already has an appointment at that exact time
    #[error("Practitioner {license_id} already has an appointment at {}", .at.format("%d/%m/%Y %H:%M"))]
    SlotTaken {
        license_id: String,
        at: NaiveDateTime,
    },

    /// The practitioner does not offer the specialty on that weekday
    #[error("Practitioner {license_id} does not offer {specialty} on {weekday}")]
    PractitionerUnavailable {
        license_id: String,
        specialty: String,
        weekday: String,
    },

    /// Prescription rejected at construction
    #[error("Invalid prescription: {0}")]
    InvalidPrescription(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The shared engine lock was poisoned by a panicking holder
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Fieldless discriminant of [`Error`], convenient for matching and assertions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    AlreadyRegistered,
    PatientNotFound,
    PractitionerNotFound,
    SlotTaken,
    PractitionerUnavailable,
    InvalidPrescription,
    Io,
    Serialization,
    Config,
    LockPoisoned,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::AlreadyRegistered { .. } => ErrorKind::AlreadyRegistered,
            Error::NotFound {
                entity: Entity::Patient,
                ..
            } => ErrorKind::PatientNotFound,
            Error::NotFound {
                entity: Entity::Practitioner,
                ..
            } => ErrorKind::PractitionerNotFound,
            Error::SlotTaken { .. } => ErrorKind::SlotTaken,
            Error::PractitionerUnavailable { .. } => ErrorKind::PractitionerUnavailable,
            Error::InvalidPrescription(_) => ErrorKind::InvalidPrescription,
            Error::Io(_) => ErrorKind::Io,
            Error::Json(_) | Error::Csv(_) => ErrorKind::Serialization,
            Error::Toml(_) | Error::Config(_) => ErrorKind::Config,
            Error::LockPoisoned(_) => ErrorKind::LockPoisoned,
        }
    }

    pub(crate) fn patient_not_found(national_id: &str) -> Self {
        Error::NotFound {
            entity: Entity::Patient,
            id: national_id.to_string(),
        }
    }

    pub(crate) fn practitioner_not_found(license_id: &str) -> Self {
        Error::NotFound {
            entity: Entity::Practitioner,
            id: license_id.to_string(),
        }
    }
}
