//! Thread-safe handle around the scheduling engine.
//!
//! One mutex guards the whole registry. Every operation holds it from the
//! first lookup to the final append, so the conflict scan and the booking
//! it guards can never interleave with another caller.

use crate::{
    Appointment, ClinicRegistry, ClinicalHistory, Error, Patient, Practitioner, Prescription,
    Result, SchedulingEngine,
};
use chrono::NaiveDateTime;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

impl<T> From<PoisonError<T>> for Error {
    fn from(e: PoisonError<T>) -> Self {
        Error::LockPoisoned(e.to_string())
    }
}

/// Cloneable handle; all clones share the same engine
#[derive(Clone, Debug, Default)]
pub struct SharedEngine {
    engine: Arc<Mutex<SchedulingEngine>>,
}

impl SharedEngine {
    pub fn new(engine: SchedulingEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn from_registry(registry: ClinicRegistry) -> Self {
        Self::new(SchedulingEngine::new(registry))
    }

    fn lock(&self) -> Result<MutexGuard<'_, SchedulingEngine>> {
        Ok(self.engine.lock()?)
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut SchedulingEngine) -> Result<R>) -> Result<R> {
        let mut engine = self.lock()?;
        f(&mut engine)
    }

    pub fn register_patient(&self, name: &str, national_id: &str, birth_date: &str) -> Result<Patient> {
        self.lock()?.register_patient(name, national_id, birth_date)
    }

    pub fn register_practitioner(&self, name: &str, license_id: &str) -> Result<Practitioner> {
        self.lock()?.register_practitioner(name, license_id)
    }

    pub fn add_specialty<S: AsRef<str>>(
        &self,
        license_id: &str,
        specialty_name: &str,
        weekdays: &[S],
    ) -> Result<bool> {
        self.lock()?.add_specialty(license_id, specialty_name, weekdays)
    }

    pub fn schedule_appointment(
        &self,
        national_id: &str,
        license_id: &str,
        specialty_name: &str,
        at: NaiveDateTime,
    ) -> Result<Appointment> {
        self.lock()?
            .schedule_appointment(national_id, license_id, specialty_name, at)
    }

    pub fn issue_prescription(
        &self,
        national_id: &str,
        license_id: &str,
        medications: Vec<String>,
    ) -> Result<Prescription> {
        self.lock()?
            .issue_prescription(national_id, license_id, medications)
    }

    /// Snapshot of a patient's history
    pub fn history(&self, national_id: &str) -> Result<ClinicalHistory> {
        Ok(self.lock()?.history(national_id)?.clone())
    }

    pub fn list_appointments(&self) -> Result<Vec<Appointment>> {
        Ok(self.lock()?.list_appointments().to_vec())
    }

    pub fn list_patients(&self) -> Result<Vec<Patient>> {
        Ok(self.lock()?.list_patients().to_vec())
    }

    pub fn list_practitioners(&self) -> Result<Vec<Practitioner>> {
        Ok(self.lock()?.list_practitioners().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use chrono::NaiveDate;
    use std::thread;

    fn monday_at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 16)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn create_shared_engine(patients: usize) -> SharedEngine {
        let shared = SharedEngine::default();
        shared.register_practitioner("Carlos Rivera", "MP1234").unwrap();
        shared
            .add_specialty("MP1234", "Cardiología", &["lunes"])
            .unwrap();
        for i in 0..patients {
            shared
                .register_patient(&format!("Paciente {}", i), &format!("{}", 1000 + i), "")
                .unwrap();
        }
        shared
    }

    #[test]
    fn test_concurrent_bookings_for_same_slot() {
        let shared = create_shared_engine(8);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.schedule_appointment(
                        &format!("{}", 1000 + i),
                        "MP1234",
                        "Cardiología",
                        monday_at(10),
                    )
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let booked = results.iter().filter(|r| r.is_ok()).count();
        let taken = results
            .iter()
            .filter(|r| matches!(r, Err(e) if e.kind() == ErrorKind::SlotTaken))
            .count();

        assert_eq!(booked, 1);
        assert_eq!(taken, 7);
        assert_eq!(shared.list_appointments().unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_bookings_for_distinct_slots() {
        let shared = create_shared_engine(6);

        let handles: Vec<_> = (0..6)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.schedule_appointment(
                        &format!("{}", 1000 + i),
                        "MP1234",
                        "Cardiología",
                        monday_at(8 + i as u32),
                    )
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
        assert_eq!(shared.list_appointments().unwrap().len(), 6);
    }

    #[test]
    fn test_history_snapshot_is_detached() {
        let shared = create_shared_engine(1);
        let before = shared.history("1000").unwrap();

        shared
            .issue_prescription("1000", "MP1234", vec!["Enalapril".into()])
            .unwrap();

        assert!(before.prescriptions().is_empty());
        assert_eq!(shared.history("1000").unwrap().prescriptions().len(), 1);
    }

    #[test]
    fn test_with_runs_under_one_lock() {
        let shared = create_shared_engine(1);
        let count = shared
            .with(|engine| {
                engine.schedule_appointment("1000", "MP1234", "Cardiología", monday_at(9))?;
                Ok(engine.list_appointments().len())
            })
            .unwrap();
        assert_eq!(count, 1);
    }
}
