//! Clinic registry: the aggregate that owns every entity.
//!
//! Patients and practitioners live in insertion-ordered tables with a
//! hash index on their identifier. Histories are keyed by national ID, and
//! the flat appointment list holds every booking ever made. Nothing outside
//! this crate can mutate the registry except through the scheduling engine.

use crate::error::Entity;
use crate::{Appointment, ClinicalHistory, Error, Patient, Practitioner, Result, Specialty};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Owner of the patient and practitioner directories, histories and appointments
#[derive(Clone, Debug, Default)]
pub struct ClinicRegistry {
    patients: Vec<Patient>,
    patient_index: HashMap<String, usize>,
    practitioners: Vec<Practitioner>,
    practitioner_index: HashMap<String, usize>,
    histories: HashMap<String, ClinicalHistory>,
    appointments: Vec<Appointment>,
}

impl ClinicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Patients
    // ------------------------------------------------------------------------

    /// Insert a patient and its empty history
    pub fn register_patient(&mut self, patient: Patient) -> Result<&Patient> {
        let national_id = patient.national_id().to_string();
        if self.patient_index.contains_key(&national_id) {
            return Err(Error::AlreadyRegistered {
                entity: Entity::Patient,
                id: national_id,
            });
        }

        let idx = self.patients.len();
        self.histories
            .insert(national_id.clone(), ClinicalHistory::new(&national_id));
        self.patient_index.insert(national_id, idx);
        self.patients.push(patient);

        Ok(&self.patients[idx])
    }

    pub fn contains_patient(&self, national_id: &str) -> bool {
        self.patient_index.contains_key(national_id)
    }

    pub fn lookup_patient(&self, national_id: &str) -> Result<&Patient> {
        self.patient_index
            .get(national_id)
            .map(|&idx| &self.patients[idx])
            .ok_or_else(|| Error::patient_not_found(national_id))
    }

    /// Patients in registration order
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn history(&self, national_id: &str) -> Result<&ClinicalHistory> {
        self.histories
            .get(national_id)
            .ok_or_else(|| Error::patient_not_found(national_id))
    }

    pub(crate) fn history_mut(&mut self, national_id: &str) -> Result<&mut ClinicalHistory> {
        self.histories
            .get_mut(national_id)
            .ok_or_else(|| Error::patient_not_found(national_id))
    }

    // ------------------------------------------------------------------------
    // Practitioners
    // ------------------------------------------------------------------------

    pub fn register_practitioner(&mut self, practitioner: Practitioner) -> Result<&Practitioner> {
        let license_id = practitioner.license_id().to_string();
        if self.practitioner_index.contains_key(&license_id) {
            return Err(Error::AlreadyRegistered {
                entity: Entity::Practitioner,
                id: license_id,
            });
        }

        let idx = self.practitioners.len();
        self.practitioner_index.insert(license_id, idx);
        self.practitioners.push(practitioner);

        Ok(&self.practitioners[idx])
    }

    pub fn contains_practitioner(&self, license_id: &str) -> bool {
        self.practitioner_index.contains_key(license_id)
    }

    pub fn lookup_practitioner(&self, license_id: &str) -> Result<&Practitioner> {
        self.practitioner_index
            .get(license_id)
            .map(|&idx| &self.practitioners[idx])
            .ok_or_else(|| Error::practitioner_not_found(license_id))
    }

    /// Practitioners in registration order
    pub fn practitioners(&self) -> &[Practitioner] {
        &self.practitioners
    }

    /// Add a specialty to a registered practitioner
    ///
    /// Returns `Ok(false)` when a same-named specialty was already present.
    pub fn add_specialty(&mut self, license_id: &str, specialty: Specialty) -> Result<bool> {
        let idx = *self
            .practitioner_index
            .get(license_id)
            .ok_or_else(|| Error::practitioner_not_found(license_id))?;
        Ok(self.practitioners[idx].add_specialty(specialty))
    }

    // ------------------------------------------------------------------------
    // Appointments
    // ------------------------------------------------------------------------

    /// Every appointment in booking order
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// The stored appointment that already holds this practitioner slot
    pub fn find_conflict(&self, license_id: &str, at: NaiveDateTime) -> Option<&Appointment> {
        self.appointments
            .iter()
            .find(|a| a.conflicts_with(license_id, at))
    }

    /// Append to the global list and the patient's history
    ///
    /// Callers must have resolved the patient and checked for conflicts.
    pub(crate) fn commit_appointment(&mut self, appointment: Appointment) -> Result<()> {
        self.history_mut(&appointment.national_id)?
            .record_appointment(appointment.clone());
        self.appointments.push(appointment);
        Ok(())
    }
}
