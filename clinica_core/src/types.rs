//! Core domain types for the clinic registry.
//!
//! This module defines the entities the scheduling engine works with:
//! - Patients and practitioners (directory entries)
//! - Specialties and their weekly availability
//! - Appointments and prescriptions (clinical records)
//!
//! Records refer back to patients and practitioners by identifier only;
//! the registry owns every entity.

use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical form used for every case-insensitive comparison
pub(crate) fn canonical(s: &str) -> String {
    s.trim().to_lowercase()
}

fn required(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// Directory Entries
// ============================================================================

/// A registered patient, keyed by national ID (DNI)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    name: String,
    national_id: String,
    birth_date: String,
}

impl Patient {
    /// Create a patient; name and national ID are required
    pub fn new(
        name: impl Into<String>,
        national_id: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: required("patient name", name.into())?,
            national_id: required("national ID", national_id.into())?,
            birth_date: birth_date.into().trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    /// Birth date exactly as entered (not parsed)
    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }
}

/// A medical specialty together with the weekdays it is offered
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "SpecialtyRecord")]
pub struct Specialty {
    name: String,
    key: String,
    weekdays: Vec<String>,
}

impl Specialty {
    /// Create a specialty offered on the given weekdays
    ///
    /// Weekday names are stored lowercase and de-duplicated. Blank entries
    /// are dropped; a name or weekday list that ends up empty is rejected.
    pub fn new<I, S>(name: impl Into<String>, weekdays: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = required("specialty name", name.into())?;

        let mut days: Vec<String> = Vec::new();
        for day in weekdays {
            let day = canonical(day.as_ref());
            if day.is_empty() || days.contains(&day) {
                continue;
            }
            if !crate::availability::is_weekday_name(&day) {
                tracing::warn!("Specialty {} lists unrecognised weekday {:?}", name, day);
            }
            days.push(day);
        }

        if days.is_empty() {
            return Err(Error::InvalidInput(format!(
                "specialty {} needs at least one weekday",
                name
            )));
        }

        Ok(Self {
            key: canonical(&name),
            name,
            weekdays: days,
        })
    }

    /// Display name, as entered
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase name used for matching
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lowercase weekday names, in the order they were given
    pub fn weekdays(&self) -> &[String] {
        &self.weekdays
    }
}

/// Serialized form of a specialty; the matching key is always recomputed
#[derive(Deserialize)]
struct SpecialtyRecord {
    name: String,
    weekdays: Vec<String>,
}

impl TryFrom<SpecialtyRecord> for Specialty {
    type Error = Error;

    fn try_from(record: SpecialtyRecord) -> Result<Self> {
        Specialty::new(record.name, record.weekdays)
    }
}

/// A registered practitioner, keyed by license ID (matrícula)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Practitioner {
    name: String,
    license_id: String,
    specialties: Vec<Specialty>,
}

impl Practitioner {
    /// Create a practitioner with no specialties
    pub fn new(name: impl Into<String>, license_id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: required("practitioner name", name.into())?,
            license_id: required("license ID", license_id.into())?,
            specialties: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn license_id(&self) -> &str {
        &self.license_id
    }

    /// Specialties in insertion order
    pub fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    /// Append a specialty unless one with the same name is already held
    ///
    /// Returns `false` (and changes nothing) for a duplicate name.
    pub fn add_specialty(&mut self, specialty: Specialty) -> bool {
        if self.specialties.iter().any(|s| s.key == specialty.key) {
            tracing::warn!(
                "Practitioner {} already offers {}, ignoring duplicate",
                self.license_id,
                specialty.name
            );
            return false;
        }
        self.specialties.push(specialty);
        true
    }
}

// ============================================================================
// Clinical Records
// ============================================================================

/// A booked appointment (turno)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Appointment {
    pub id: Uuid,
    pub national_id: String,
    pub license_id: String,
    pub at: NaiveDateTime,
    pub specialty: String,
}

impl Appointment {
    pub(crate) fn new(
        national_id: &str,
        license_id: &str,
        at: NaiveDateTime,
        specialty: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            national_id: national_id.to_string(),
            license_id: license_id.to_string(),
            at,
            specialty: specialty.trim().to_string(),
        }
    }

    /// Same practitioner at the identical time; the patient is irrelevant
    pub fn conflicts_with(&self, license_id: &str, at: NaiveDateTime) -> bool {
        self.license_id == license_id && self.at == at
    }
}

/// A prescription issued by a practitioner for a patient
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prescription {
    id: Uuid,
    national_id: String,
    license_id: String,
    medications: Vec<String>,
    issued_at: NaiveDateTime,
}

impl Prescription {
    /// Create a prescription stamped with the local system clock
    ///
    /// Fails with [`Error::InvalidPrescription`] for an empty medication list.
    pub fn new(
        national_id: impl Into<String>,
        license_id: impl Into<String>,
        medications: Vec<String>,
    ) -> Result<Self> {
        Self::with_issue_time(
            national_id,
            license_id,
            medications,
            chrono::Local::now().naive_local(),
        )
    }

    /// Create a prescription with an explicit issue time
    pub fn with_issue_time(
        national_id: impl Into<String>,
        license_id: impl Into<String>,
        medications: Vec<String>,
        issued_at: NaiveDateTime,
    ) -> Result<Self> {
        if medications.is_empty() {
            return Err(Error::InvalidPrescription(
                "the medication list must not be empty".into(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            national_id: national_id.into(),
            license_id: license_id.into(),
            medications,
            issued_at,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    /// License ID of the issuing practitioner
    pub fn license_id(&self) -> &str {
        &self.license_id
    }

    /// Never empty
    pub fn medications(&self) -> &[String] {
        &self.medications
    }

    pub fn issued_at(&self) -> NaiveDateTime {
        self.issued_at
    }
}
