//! Built-in sample data for the interactive shell.
//!
//! Two practitioners and two patients, enough to book an appointment
//! without typing any registrations first.

use crate::{ErrorKind, Result, SchedulingEngine};

struct SamplePractitioner {
    name: &'static str,
    license_id: &'static str,
    specialties: &'static [(&'static str, &'static [&'static str])],
}

const PRACTITIONERS: &[SamplePractitioner] = &[
    SamplePractitioner {
        name: "Carlos Rivera",
        license_id: "MP1234",
        specialties: &[
            ("Cardiología", &["lunes", "miércoles"]),
            ("Clínica", &["viernes"]),
        ],
    },
    SamplePractitioner {
        name: "Ana Gómez",
        license_id: "MP5678",
        specialties: &[("Pediatría", &["martes", "jueves"])],
    },
];

/// (name, national ID, birth date)
const PATIENTS: &[(&str, &str, &str)] = &[
    ("Juan Pérez", "30123456", "15/05/1982"),
    ("María López", "35789012", "20/11/1990"),
];

/// Register the sample practitioners and patients
///
/// Entries that are already registered are skipped with a warning, so
/// seeding twice is harmless. Returns how many entries were newly added.
pub fn load_sample_data(engine: &mut SchedulingEngine) -> Result<usize> {
    let mut added = 0;

    for sample in PRACTITIONERS {
        match engine.register_practitioner(sample.name, sample.license_id) {
            Ok(_) => added += 1,
            Err(e) if e.kind() == ErrorKind::AlreadyRegistered => {
                tracing::warn!("Skipping sample practitioner: {}", e);
                continue;
            }
            Err(e) => return Err(e),
        }
        for &(specialty, days) in sample.specialties {
            engine.add_specialty(sample.license_id, specialty, days)?;
        }
    }

    for &(name, national_id, birth_date) in PATIENTS {
        match engine.register_patient(name, national_id, birth_date) {
            Ok(_) => added += 1,
            Err(e) if e.kind() == ErrorKind::AlreadyRegistered => {
                tracing::warn!("Skipping sample patient: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!("Loaded {} sample directory entries", added);
    Ok(added)
}
