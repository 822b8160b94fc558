//! Per-patient clinical history.
//!
//! A history is created together with its patient and only ever grows:
//! appointments and prescriptions are appended in the order they were
//! recorded and never removed.

use crate::{Appointment, Prescription};
use serde::{Deserialize, Serialize};

/// Append-only record of a patient's appointments and prescriptions
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClinicalHistory {
    national_id: String,
    appointments: Vec<Appointment>,
    prescriptions: Vec<Prescription>,
}

impl ClinicalHistory {
    pub(crate) fn new(national_id: &str) -> Self {
        Self {
            national_id: national_id.to_string(),
            appointments: Vec::new(),
            prescriptions: Vec::new(),
        }
    }

    /// National ID of the patient this history belongs to
    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    /// Appointments in booking order
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Appointments sorted by date and time (stable for equal times)
    pub fn appointments_by_datetime(&self) -> Vec<&Appointment> {
        let mut sorted: Vec<_> = self.appointments.iter().collect();
        sorted.sort_by_key(|a| a.at);
        sorted
    }

    /// Prescriptions in issue order
    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty() && self.prescriptions.is_empty()
    }

    pub(crate) fn record_appointment(&mut self, appointment: Appointment) {
        tracing::debug!(
            "Recorded appointment {} in history of {}",
            appointment.id,
            self.national_id
        );
        self.appointments.push(appointment);
    }

    pub(crate) fn record_prescription(&mut self, prescription: Prescription) {
        tracing::debug!(
            "Recorded prescription {} in history of {}",
            prescription.id(),
            self.national_id
        );
        self.prescriptions.push(prescription);
    }
}
