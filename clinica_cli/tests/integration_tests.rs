//! Integration tests for the turnos binary.
//!
//! These tests drive the interactive menu through stdin and verify:
//! - Booking rules and the error each rejected booking reports
//! - Prescriptions and clinical history output
//! - Configuration and seeding options
//! - Appointment export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create an isolated config home
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary, isolated from the user's config
fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("turnos"));
    cmd.env("XDG_CONFIG_HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

/// Join menu answers into stdin content
fn script(lines: &[&str]) -> String {
    let mut input = lines.join("\n");
    input.push('\n');
    input
}

// 16/06/2025 is a Monday
const BOOK_MONDAY: [&str; 5] = ["4", "30123456", "MP1234", "Cardiología", "16/06/2025 10:00"];

#[test]
fn test_cli_help() {
    let home = setup_test_dir();
    cli(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Clinic appointment scheduling system",
        ));
}

#[test]
fn test_exit_option() {
    let home = setup_test_dir();
    cli(&home)
        .write_stdin(script(&["0"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample data loaded (4 entries)."))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let home = setup_test_dir();
    cli(&home)
        .arg("shell")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Clinic Menu ---"));
}

#[test]
fn test_booking_and_rejections() {
    let home = setup_test_dir();
    let mut lines: Vec<&str> = BOOK_MONDAY.to_vec();
    // Same practitioner and time, different patient
    lines.extend(["4", "35789012", "MP1234", "Cardiología", "16/06/2025 10:00"]);
    // Tuesday
    lines.extend(["4", "30123456", "MP1234", "Cardiología", "17/06/2025 10:00"]);
    // Specialty the practitioner lacks
    lines.extend(["4", "30123456", "MP1234", "Dermatología", "16/06/2025 11:00"]);
    lines.push("0");

    cli(&home)
        .write_stdin(script(&lines))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Appointment booked: Appointment: 16/06/2025 10:00 - Patient: 30123456 | Dr. Carlos Rivera | Specialty: Cardiología",
        ))
        .stdout(predicate::str::contains(
            "Error: Practitioner MP1234 already has an appointment at 16/06/2025 10:00",
        ))
        .stdout(predicate::str::contains(
            "Error: Practitioner MP1234 does not offer Cardiología on martes",
        ))
        .stdout(predicate::str::contains(
            "Error: Practitioner MP1234 does not offer Dermatología on lunes",
        ));
}

#[test]
fn test_unknown_identifiers() {
    let home = setup_test_dir();
    let lines = [
        "4", "DNI_FALSO", "MP_FALSA", "Cardiología", "16/06/2025 10:00",
        "4", "30123456", "MP_FALSA", "Cardiología", "16/06/2025 10:00",
        "6", "99999999",
        "0",
    ];

    cli(&home)
        .write_stdin(script(&lines))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: No patient registered with identifier DNI_FALSO",
        ))
        .stdout(predicate::str::contains(
            "Error: No practitioner registered with identifier MP_FALSA",
        ))
        .stdout(predicate::str::contains(
            "Error: No patient registered with identifier 99999999",
        ));
}

#[test]
fn test_invalid_datetime_is_reported() {
    let home = setup_test_dir();
    let lines = ["4", "30123456", "MP1234", "Cardiología", "2025-06-16 10:00", "0"];

    cli(&home)
        .write_stdin(script(&lines))
        .assert()
        .success()
        .stdout(predicate::str::contains("could not read \"2025-06-16 10:00\""))
        .stdout(predicate::str::contains("Appointment booked").not());
}

#[test]
fn test_prescriptions_and_history() {
    let home = setup_test_dir();
    let mut lines: Vec<&str> = vec![
        // Wednesday first, so history must reorder
        "4", "30123456", "MP1234", "Cardiología", "18/06/2025 09:00",
    ];
    lines.extend(BOOK_MONDAY);
    lines.extend(["5", "30123456", "MP1234", "Aspirina Prevent, Enalapril 10mg"]);
    lines.extend(["5", "30123456", "MP1234", " , "]);
    lines.extend(["6", "30123456", "0"]);

    let output = cli(&home)
        .write_stdin(script(&lines))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Invalid prescription: the medication list must not be empty",
        ))
        .stdout(predicate::str::contains("--- Clinical history of Juan Pérez ---"))
        .stdout(predicate::str::contains(
            "Issued by Dr. Carlos Rivera for Juan Pérez: Aspirina Prevent, Enalapril 10mg",
        ))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let history = &stdout[stdout.find("--- Clinical history").unwrap()..];
    let monday = history.find("16/06/2025 10:00").unwrap();
    let wednesday = history.find("18/06/2025 09:00").unwrap();
    assert!(monday < wednesday, "history should list appointments by date");
    // Only the valid prescription was recorded
    assert_eq!(history.matches("- Prescription (").count(), 1);
}

#[test]
fn test_empty_history() {
    let home = setup_test_dir();
    cli(&home)
        .write_stdin(script(&["6", "35789012", "0"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("No appointments recorded."))
        .stdout(predicate::str::contains("No prescriptions recorded."));
}

#[test]
fn test_registration_flow() {
    let home = setup_test_dir();
    let lines = [
        "2", "Roberto Sanchez", "MP9999",
        "3", "MP9999", "Dermatología", "Martes, jueves",
        "3", "MP9999", "DERMATOLOGÍA", "viernes",
        "1", "Laura Nuñez", "34567890", "10/02/1989",
        "1", "Otro Paciente", "34567890", "01/01/2000",
        "1", "", "11223344", "01/01/2000",
        "4", "34567890", "MP9999", "dermatología", "17/06/2025 16:45",
        "9",
        "0",
    ];

    cli(&home)
        .arg("--no-seed")
        .write_stdin(script(&lines))
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample data loaded").not())
        .stdout(predicate::str::contains("Practitioner 'Roberto Sanchez' added."))
        .stdout(predicate::str::contains(
            "Specialty 'Dermatología' added to Dr. Roberto Sanchez.",
        ))
        .stdout(predicate::str::contains(
            "Dr. Roberto Sanchez already offers 'DERMATOLOGÍA'; nothing changed.",
        ))
        .stdout(predicate::str::contains("Patient 'Laura Nuñez' added."))
        .stdout(predicate::str::contains(
            "Error: The patient 34567890 is already registered",
        ))
        .stdout(predicate::str::contains(
            "Error: Invalid input: patient name must not be empty",
        ))
        .stdout(predicate::str::contains("Appointment booked"))
        .stdout(predicate::str::contains(
            "Dr. Roberto Sanchez (License: MP9999) - Specialties: Dermatología (Days: Martes, Jueves)",
        ));
}

#[test]
fn test_add_specialty_to_unknown_practitioner() {
    let home = setup_test_dir();
    cli(&home)
        .write_stdin(script(&["3", "MATRICULA_INEXISTENTE", "0"]))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: No practitioner registered with identifier MATRICULA_INEXISTENTE",
        ));
}

#[test]
fn test_listings_without_seed() {
    let home = setup_test_dir();
    cli(&home)
        .arg("--no-seed")
        .write_stdin(script(&["7", "8", "9", "0"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("No appointments booked."))
        .stdout(predicate::str::contains("No patients registered."))
        .stdout(predicate::str::contains("No practitioners registered."));
}

#[test]
fn test_all_appointments_sorted_by_datetime() {
    let home = setup_test_dir();
    let lines = [
        "4", "35789012", "MP5678", "Pediatría", "19/06/2025 08:00",
        "4", "30123456", "MP1234", "Clínica", "20/06/2025 12:00",
        "4", "30123456", "MP5678", "Pediatría", "17/06/2025 08:00",
        "7",
        "0",
    ];

    let output = cli(&home)
        .write_stdin(script(&lines))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let listing = &stdout[stdout.find("--- All Appointments ---").unwrap()..];
    let first = listing.find("17/06/2025 08:00").unwrap();
    let second = listing.find("19/06/2025 08:00").unwrap();
    let third = listing.find("20/06/2025 12:00").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_export_csv_and_json() {
    let home = setup_test_dir();
    let csv_path = home.path().join("out").join("turnos.csv");
    let json_path = home.path().join("turnos.json");
    let csv_arg = csv_path.to_string_lossy().to_string();
    let json_arg = json_path.to_string_lossy().to_string();

    let mut lines: Vec<&str> = BOOK_MONDAY.to_vec();
    lines.extend(["10", csv_arg.as_str(), "10", json_arg.as_str(), "10", "turnos.txt", "0"]);

    cli(&home)
        .current_dir(home.path())
        .write_stdin(script(&lines))
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 appointments to"))
        .stdout(predicate::str::contains("use a .csv or .json file"));

    let csv = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(csv.contains("id,datetime,weekday,national_id,patient,license_id,practitioner,specialty"));
    assert!(csv.contains("2025-06-16T10:00,lunes,30123456,Juan Pérez,MP1234,Carlos Rivera,Cardiología"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json[0]["specialty"], "Cardiología");
    assert!(!home.path().join("turnos.txt").exists());
}

#[test]
fn test_config_file_controls_format_and_seeding() {
    let home = setup_test_dir();
    let config_path = home.path().join("custom.toml");
    fs::write(
        &config_path,
        r#"
[clinic]
seed_sample_data = false

[display]
datetime_format = "%Y-%m-%d %H:%M"
"#,
    )
    .unwrap();

    let lines = [
        "2", "Ana Gómez", "MP5678",
        "3", "MP5678", "Pediatría", "martes",
        "1", "María López", "35789012", "20/11/1990",
        "4", "35789012", "MP5678", "Pediatría", "2025-06-17 15:30",
        "0",
    ];

    cli(&home)
        .arg("--config")
        .arg(&config_path)
        .write_stdin(script(&lines))
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample data loaded").not())
        .stdout(predicate::str::contains(
            "Appointment booked: Appointment: 2025-06-17 15:30",
        ));
}

#[test]
fn test_default_config_location_is_used() {
    let home = setup_test_dir();
    let dir = home.path().join("turnos");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "[clinic]\nseed_sample_data = false\n").unwrap();

    cli(&home)
        .write_stdin(script(&["8", "0"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("No patients registered."));
}

#[test]
fn test_invalid_config_fails() {
    let home = setup_test_dir();
    let config_path = home.path().join("bad.toml");
    fs::write(&config_path, "[display]\ndatetime_format = \"\"\n").unwrap();

    cli(&home)
        .arg("--config")
        .arg(&config_path)
        .write_stdin("0\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config"));
}

#[test]
fn test_sample_subcommand() {
    let home = setup_test_dir();
    cli(&home)
        .arg("sample")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dr. Carlos Rivera (License: MP1234) - Specialties: Cardiología (Days: Lunes, Miércoles); Clínica (Days: Viernes)",
        ))
        .stdout(predicate::str::contains("Patient: María López (DNI: 35789012)"));
}
