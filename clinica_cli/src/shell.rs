//! Interactive menu loop.
//!
//! Reads one answer per line from `input`, calls into the scheduling
//! engine and reports the outcome on `output`. Engine failures are shown
//! and the loop goes on; end of input ends the session.

use crate::render;
use chrono::NaiveDateTime;
use clinica_core::{export_appointments, Config, Error, Result, SchedulingEngine};
use std::io::{BufRead, Write};
use std::path::PathBuf;

enum Flow {
    Continue,
    Quit,
}

/// Split a comma-separated answer, dropping blank items
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

pub struct Shell<'a, R, W> {
    engine: SchedulingEngine,
    config: &'a Config,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(engine: SchedulingEngine, config: &'a Config, input: R, output: W) -> Self {
        Self {
            engine,
            config,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;
            let Some(choice) = self.ask("Select an option: ")? else {
                break;
            };

            let outcome = match choice.as_str() {
                "1" => self.add_patient(),
                "2" => self.add_practitioner(),
                "3" => self.add_specialty(),
                "4" => self.schedule_appointment(),
                "5" => self.issue_prescription(),
                "6" => self.show_history(),
                "7" => self.list_appointments(),
                "8" => self.list_patients(),
                "9" => self.list_practitioners(),
                "10" => self.export(),
                "0" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                other => {
                    writeln!(self.output, "Invalid option {:?}. Try again.", other)?;
                    Ok(Flow::Continue)
                }
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => {
                    tracing::debug!("Shell action failed: {:?}", e);
                    writeln!(self.output, "Error: {}", e)?;
                }
            }
        }

        writeln!(self.output)?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Clinic Menu ---")?;
        writeln!(self.output, "1) Add patient")?;
        writeln!(self.output, "2) Add practitioner")?;
        writeln!(self.output, "3) Add specialty to practitioner")?;
        writeln!(self.output, "4) Book appointment")?;
        writeln!(self.output, "5) Issue prescription")?;
        writeln!(self.output, "6) View patient clinical history")?;
        writeln!(self.output, "7) View all appointments")?;
        writeln!(self.output, "8) View all patients")?;
        writeln!(self.output, "9) View all practitioners")?;
        writeln!(self.output, "10) Export appointments (.csv or .json)")?;
        writeln!(self.output, "0) Exit")?;
        Ok(())
    }

    /// Prompt and read one trimmed line; `None` at end of input
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn parse_datetime(&self, raw: &str) -> Result<NaiveDateTime> {
        let format = &self.config.display.datetime_format;
        NaiveDateTime::parse_from_str(raw, format).map_err(|e| {
            Error::InvalidInput(format!(
                "could not read {:?} as a date and time ({}), expected format {}",
                raw, e, format
            ))
        })
    }

    fn add_patient(&mut self) -> Result<Flow> {
        let Some(name) = self.ask("Patient full name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(national_id) = self.ask("Patient DNI: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(birth_date) = self.ask("Birth date (dd/mm/yyyy): ")? else {
            return Ok(Flow::Quit);
        };

        let patient = self
            .engine
            .register_patient(&name, &national_id, &birth_date)?;
        writeln!(self.output, "Patient '{}' added.", patient.name())?;
        Ok(Flow::Continue)
    }

    fn add_practitioner(&mut self) -> Result<Flow> {
        let Some(name) = self.ask("Practitioner full name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(license_id) = self.ask("Practitioner license ID: ")? else {
            return Ok(Flow::Quit);
        };

        let practitioner = self.engine.register_practitioner(&name, &license_id)?;
        writeln!(self.output, "Practitioner '{}' added.", practitioner.name())?;
        Ok(Flow::Continue)
    }

    fn add_specialty(&mut self) -> Result<Flow> {
        let Some(license_id) = self.ask("Practitioner license ID: ")? else {
            return Ok(Flow::Quit);
        };
        // Fail early, before asking for the rest
        let doctor = self.engine.lookup_practitioner(&license_id)?.name().to_string();

        let Some(specialty) = self.ask("Specialty name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(days) = self.ask("Weekdays (comma separated, e.g. lunes,martes): ")? else {
            return Ok(Flow::Quit);
        };

        if self
            .engine
            .add_specialty(&license_id, &specialty, &split_list(&days))?
        {
            writeln!(self.output, "Specialty '{}' added to Dr. {}.", specialty, doctor)?;
        } else {
            writeln!(
                self.output,
                "Dr. {} already offers '{}'; nothing changed.",
                doctor, specialty
            )?;
        }
        Ok(Flow::Continue)
    }

    fn schedule_appointment(&mut self) -> Result<Flow> {
        let Some(national_id) = self.ask("Patient DNI: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(license_id) = self.ask("Practitioner license ID: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(specialty) = self.ask("Requested specialty: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(raw_at) = self.ask("Appointment date and time (dd/mm/yyyy HH:MM): ")? else {
            return Ok(Flow::Quit);
        };

        let at = self.parse_datetime(&raw_at)?;
        let appt = self
            .engine
            .schedule_appointment(&national_id, &license_id, &specialty, at)?;
        writeln!(
            self.output,
            "Appointment booked: {}",
            render::appointment(&appt, self.engine.registry(), self.config)
        )?;
        Ok(Flow::Continue)
    }

    fn issue_prescription(&mut self) -> Result<Flow> {
        let Some(national_id) = self.ask("Patient DNI: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(license_id) = self.ask("Issuing practitioner license ID: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(medications) = self.ask("Medications (comma separated): ")? else {
            return Ok(Flow::Quit);
        };

        self.engine
            .issue_prescription(&national_id, &license_id, split_list(&medications))?;
        writeln!(
            self.output,
            "Prescription issued and stored in the clinical history."
        )?;
        Ok(Flow::Continue)
    }

    fn show_history(&mut self) -> Result<Flow> {
        let Some(national_id) = self.ask("Patient DNI: ")? else {
            return Ok(Flow::Quit);
        };

        let history = self.engine.history(&national_id)?;
        let text = render::history(history, self.engine.registry(), self.config);
        write!(self.output, "{}", text)?;
        Ok(Flow::Continue)
    }

    fn list_appointments(&mut self) -> Result<Flow> {
        let mut appointments: Vec<_> = self.engine.list_appointments().iter().collect();
        if appointments.is_empty() {
            writeln!(self.output, "\nNo appointments booked.")?;
            return Ok(Flow::Continue);
        }

        appointments.sort_by_key(|a| a.at);
        writeln!(self.output, "\n--- All Appointments ---")?;
        for appt in appointments {
            writeln!(
                self.output,
                "{}",
                render::appointment(appt, self.engine.registry(), self.config)
            )?;
        }
        Ok(Flow::Continue)
    }

    fn list_patients(&mut self) -> Result<Flow> {
        if self.engine.list_patients().is_empty() {
            writeln!(self.output, "\nNo patients registered.")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "\n--- Patients ---")?;
        for patient in self.engine.list_patients() {
            writeln!(self.output, "{}", render::patient(patient))?;
        }
        Ok(Flow::Continue)
    }

    fn list_practitioners(&mut self) -> Result<Flow> {
        if self.engine.list_practitioners().is_empty() {
            writeln!(self.output, "\nNo practitioners registered.")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "\n--- Practitioners ---")?;
        for practitioner in self.engine.list_practitioners() {
            writeln!(self.output, "{}", render::practitioner(practitioner))?;
        }
        Ok(Flow::Continue)
    }

    fn export(&mut self) -> Result<Flow> {
        let Some(path) = self.ask("Export file (.csv or .json): ")? else {
            return Ok(Flow::Quit);
        };

        let path = PathBuf::from(path);
        let count = export_appointments(&path, self.engine.registry())?;
        writeln!(
            self.output,
            "Exported {} appointments to {}",
            count,
            path.display()
        )?;
        Ok(Flow::Continue)
    }
}
