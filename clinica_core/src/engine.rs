//! Scheduling engine: the single entry point that mutates the registry.
//!
//! Booking an appointment runs these checks in order and stops at the
//! first failure:
//! 1. The patient must be registered
//! 2. The practitioner must be registered
//! 3. The practitioner must not already be booked at that exact minute
//! 4. The practitioner must offer the requested specialty on that weekday
//!
//! Callers rely on this precedence, so it must not be reordered. Every
//! operation is all-or-nothing: a failure leaves the registry untouched.

use crate::availability::weekday_name;
use crate::{
    Appointment, ClinicRegistry, ClinicalHistory, Error, Patient, Practitioner, Prescription,
    Result, Specialty,
};
use chrono::{NaiveDateTime, Timelike};

/// Validates and commits registrations, bookings and prescriptions
#[derive(Clone, Debug, Default)]
pub struct SchedulingEngine {
    registry: ClinicRegistry,
}

impl SchedulingEngine {
    /// Wrap an explicitly constructed registry
    pub fn new(registry: ClinicRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ClinicRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> ClinicRegistry {
        self.registry
    }

    // ========================================================================
    // Registration
    // ========================================================================

    pub fn register_patient(
        &mut self,
        name: &str,
        national_id: &str,
        birth_date: &str,
    ) -> Result<Patient> {
        let patient = Patient::new(name, national_id, birth_date)?;
        let patient = self.registry.register_patient(patient)?.clone();
        tracing::info!("Registered patient {}", patient.national_id());
        Ok(patient)
    }

    pub fn register_practitioner(&mut self, name: &str, license_id: &str) -> Result<Practitioner> {
        let practitioner = Practitioner::new(name, license_id)?;
        let practitioner = self.registry.register_practitioner(practitioner)?.clone();
        tracing::info!("Registered practitioner {}", practitioner.license_id());
        Ok(practitioner)
    }

    /// Add a specialty to a registered practitioner
    ///
    /// The practitioner is resolved before the specialty is validated.
    /// Returns `Ok(false)` when a same-named specialty already existed.
    pub fn add_specialty<S: AsRef<str>>(
        &mut self,
        license_id: &str,
        specialty_name: &str,
        weekdays: &[S],
    ) -> Result<bool> {
        let license_id = license_id.trim();
        self.registry.lookup_practitioner(license_id)?;
        let specialty = Specialty::new(specialty_name, weekdays)?;
        let added = self.registry.add_specialty(license_id, specialty)?;
        if added {
            tracing::info!("Added {} to practitioner {}", specialty_name, license_id);
        }
        Ok(added)
    }

    pub fn lookup_practitioner(&self, license_id: &str) -> Result<&Practitioner> {
        self.registry.lookup_practitioner(license_id.trim())
    }

    // ========================================================================
    // Scheduling
    // ========================================================================

    /// Book an appointment after validating it
    ///
    /// Identifiers are trimmed the same way registration stores them, and
    /// `at` is truncated to the minute before any comparison.
    pub fn schedule_appointment(
        &mut self,
        national_id: &str,
        license_id: &str,
        specialty_name: &str,
        at: NaiveDateTime,
    ) -> Result<Appointment> {
        let national_id = national_id.trim();
        let license_id = license_id.trim();
        let at = truncate_to_minute(at);

        self.registry.lookup_patient(national_id)?;
        let practitioner = self.registry.lookup_practitioner(license_id)?;

        if let Some(existing) = self.registry.find_conflict(license_id, at) {
            tracing::debug!(
                "Slot {} for {} already held by appointment {}",
                at,
                license_id,
                existing.id
            );
            return Err(Error::SlotTaken {
                license_id: license_id.to_string(),
                at,
            });
        }

        let weekday = weekday_name(&at);
        if !practitioner.offers(specialty_name, weekday) {
            return Err(Error::PractitionerUnavailable {
                license_id: license_id.to_string(),
                specialty: specialty_name.trim().to_string(),
                weekday: weekday.to_string(),
            });
        }

        let appointment = Appointment::new(national_id, license_id, at, specialty_name);
        self.registry.commit_appointment(appointment.clone())?;

        tracing::info!(
            "Booked appointment {} for {} with {} at {}",
            appointment.id,
            national_id,
            license_id,
            at
        );
        Ok(appointment)
    }

    /// Every appointment ever booked, in booking order
    pub fn list_appointments(&self) -> &[Appointment] {
        self.registry.appointments()
    }

    // ========================================================================
    // Prescriptions and histories
    // ========================================================================

    /// Issue a prescription and record it in the patient's history
    ///
    /// Any registered practitioner may prescribe; specialties are not checked.
    pub fn issue_prescription(
        &mut self,
        national_id: &str,
        license_id: &str,
        medications: Vec<String>,
    ) -> Result<Prescription> {
        let national_id = national_id.trim();
        let license_id = license_id.trim();
        self.registry.lookup_patient(national_id)?;
        self.registry.lookup_practitioner(license_id)?;

        let prescription = Prescription::new(national_id, license_id, medications)?;
        self.registry
            .history_mut(national_id)?
            .record_prescription(prescription.clone());

        tracing::info!(
            "Issued prescription {} for {} by {}",
            prescription.id(),
            national_id,
            license_id
        );
        Ok(prescription)
    }

    pub fn history(&self, national_id: &str) -> Result<&ClinicalHistory> {
        self.registry.history(national_id.trim())
    }

    pub fn list_patients(&self) -> &[Patient] {
        self.registry.patients()
    }

    pub fn list_practitioners(&self) -> &[Practitioner] {
        self.registry.practitioners()
    }
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}
