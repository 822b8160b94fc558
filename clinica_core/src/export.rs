//! One-shot export of the appointment list.
//!
//! Rows are written in date/time order with patient and practitioner names
//! resolved through the registry. Files are written once and never read
//! back.

use crate::availability::weekday_name;
use crate::{Appointment, ClinicRegistry, Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format, chosen from the file extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(ExportFormat::Csv),
            Some("json") => Ok(ExportFormat::Json),
            _ => Err(Error::InvalidInput(format!(
                "cannot export to {:?}: use a .csv or .json file",
                path
            ))),
        }
    }
}

/// CSV header; must list `ExportRow`'s fields in declaration order
const CSV_HEADER: [&str; 8] = [
    "id",
    "datetime",
    "weekday",
    "national_id",
    "patient",
    "license_id",
    "practitioner",
    "specialty",
];

/// A row in the export
#[derive(Debug, Serialize)]
struct ExportRow {
    id: String,
    datetime: String,
    weekday: &'static str,
    national_id: String,
    patient: String,
    license_id: String,
    practitioner: String,
    specialty: String,
}

impl ExportRow {
    fn resolve(appointment: &Appointment, registry: &ClinicRegistry) -> Result<Self> {
        let patient = registry.lookup_patient(&appointment.national_id)?;
        let practitioner = registry.lookup_practitioner(&appointment.license_id)?;
        Ok(ExportRow {
            id: appointment.id.to_string(),
            datetime: appointment.at.format("%Y-%m-%dT%H:%M").to_string(),
            weekday: weekday_name(&appointment.at),
            national_id: appointment.national_id.clone(),
            patient: patient.name().to_string(),
            license_id: appointment.license_id.clone(),
            practitioner: practitioner.name().to_string(),
            specialty: appointment.specialty.clone(),
        })
    }
}

fn sorted_rows(registry: &ClinicRegistry) -> Result<Vec<ExportRow>> {
    let mut appointments: Vec<_> = registry.appointments().iter().collect();
    appointments.sort_by_key(|a| a.at);
    appointments
        .into_iter()
        .map(|a| ExportRow::resolve(a, registry))
        .collect()
}

/// Export every appointment, picking the format from the extension
///
/// Returns the number of appointments written.
pub fn export_appointments(path: &Path, registry: &ClinicRegistry) -> Result<usize> {
    match ExportFormat::from_path(path)? {
        ExportFormat::Csv => export_appointments_csv(path, registry),
        ExportFormat::Json => export_appointments_json(path, registry),
    }
}

pub fn export_appointments_csv(path: &Path, registry: &ClinicRegistry) -> Result<usize> {
    let rows = sorted_rows(registry)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Header is written by hand so an empty export still has one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!("Exported {} appointments to {:?}", rows.len(), path);
    Ok(rows.len())
}

pub fn export_appointments_json(path: &Path, registry: &ClinicRegistry) -> Result<usize> {
    let rows = sorted_rows(registry)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Exported {} appointments to {:?}", rows.len(), path);
    Ok(rows.len())
}
