//! Human-readable formatting for the shell.

use clinica_core::{
    Appointment, ClinicRegistry, ClinicalHistory, Config, Patient, Practitioner, Prescription,
    Specialty,
};

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn practitioner_name<'a>(registry: &'a ClinicRegistry, license_id: &'a str) -> &'a str {
    registry
        .lookup_practitioner(license_id)
        .map(|p| p.name())
        .unwrap_or(license_id)
}

pub fn patient(patient: &Patient) -> String {
    format!("Patient: {} (DNI: {})", patient.name(), patient.national_id())
}

pub fn specialty(specialty: &Specialty) -> String {
    let days: Vec<_> = specialty.weekdays().iter().map(|d| capitalize(d)).collect();
    format!("{} (Days: {})", specialty.name(), days.join(", "))
}

pub fn practitioner(practitioner: &Practitioner) -> String {
    let specialties = if practitioner.specialties().is_empty() {
        "No specialties assigned".to_string()
    } else {
        practitioner
            .specialties()
            .iter()
            .map(specialty)
            .collect::<Vec<_>>()
            .join("; ")
    };
    format!(
        "Dr. {} (License: {}) - Specialties: {}",
        practitioner.name(),
        practitioner.license_id(),
        specialties
    )
}

pub fn appointment(appt: &Appointment, registry: &ClinicRegistry, config: &Config) -> String {
    format!(
        "Appointment: {} - Patient: {} | Dr. {} | Specialty: {}",
        appt.at.format(&config.display.datetime_format),
        appt.national_id,
        practitioner_name(registry, &appt.license_id),
        appt.specialty
    )
}

pub fn prescription(rx: &Prescription, registry: &ClinicRegistry, config: &Config) -> String {
    let patient_name = registry
        .lookup_patient(rx.national_id())
        .map(|p| p.name())
        .unwrap_or(rx.national_id());
    format!(
        "Prescription ({}) - Issued by Dr. {} for {}: {}",
        rx.issued_at().format(&config.display.date_format),
        practitioner_name(registry, rx.license_id()),
        patient_name,
        rx.medications().join(", ")
    )
}

pub fn history(history: &ClinicalHistory, registry: &ClinicRegistry, config: &Config) -> String {
    let owner = registry
        .lookup_patient(history.national_id())
        .map(|p| p.name())
        .unwrap_or(history.national_id());

    let mut out = format!("--- Clinical history of {} ---\n", owner);

    out.push_str("\n>> Appointments:\n");
    if history.appointments().is_empty() {
        out.push_str("No appointments recorded.\n");
    } else {
        for appt in history.appointments_by_datetime() {
            out.push_str(&format!("- {}\n", appointment(appt, registry, config)));
        }
    }

    out.push_str("\n>> Prescriptions:\n");
    if history.prescriptions().is_empty() {
        out.push_str("No prescriptions recorded.\n");
    } else {
        for rx in history.prescriptions() {
            out.push_str(&format!("- {}\n", prescription(rx, registry, config)));
        }
    }

    out
}
