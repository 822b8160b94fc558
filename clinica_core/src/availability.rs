//! Specialty availability matching.
//!
//! A practitioner is available for a request when it holds a specialty with
//! the requested name (case-insensitive) whose weekday set contains the
//! weekday of the requested date. Matching is exact; there is no partial or
//! fuzzy comparison.

use crate::types::canonical;
use crate::{Practitioner, Specialty};
use chrono::{Datelike, NaiveDateTime};

/// Canonical weekday names, Monday first
pub const WEEKDAY_NAMES: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

/// Weekday name of a timestamp, independent of the process locale
pub fn weekday_name(at: &NaiveDateTime) -> &'static str {
    WEEKDAY_NAMES[at.weekday().num_days_from_monday() as usize]
}

/// Whether `name` is one of the canonical weekday names (case-insensitive)
pub fn is_weekday_name(name: &str) -> bool {
    let name = canonical(name);
    WEEKDAY_NAMES.iter().any(|d| *d == name)
}

impl Specialty {
    /// True iff the specialty is offered on `weekday` (case-insensitive)
    pub fn offers_on(&self, weekday: &str) -> bool {
        let weekday = canonical(weekday);
        self.weekdays().iter().any(|d| *d == weekday)
    }
}

impl Practitioner {
    /// True iff the practitioner offers `specialty_name` on `weekday`
    pub fn offers(&self, specialty_name: &str, weekday: &str) -> bool {
        let key = canonical(specialty_name);
        self.specialties()
            .iter()
            .any(|s| s.key() == key && s.offers_on(weekday))
    }

    /// First specialty (in insertion order) offered on `weekday`
    pub fn specialty_for_day(&self, weekday: &str) -> Option<&Specialty> {
        self.specialties().iter().find(|s| s.offers_on(weekday))
    }

    /// Every weekday on which the practitioner sees patients, Monday first
    pub fn weekdays(&self) -> Vec<&'static str> {
        WEEKDAY_NAMES
            .iter()
            .copied()
            .filter(|day| self.specialty_for_day(day).is_some())
            .collect()
    }
}
