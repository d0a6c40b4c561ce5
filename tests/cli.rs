use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const EXPORT: &str = "\
Confirmation Code,Booking date,Start date,End date,Gross earnings,Listing
HMA1,01/02/2025,01/20/2025,01/23/2025,450.00,Loft
HMB2,01/05/2025,02/01/2025,02/05/2025,610.50,Loft
HMC3,02/10/2025,03/01/2025,03/02/2025,120.00,Loft
";

fn hostbook(home: &Path, master: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hostbook").unwrap();
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("HOSTBOOK_LOG")
        .arg("--master")
        .arg(master);
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn import_into_empty_master_adds_every_booking() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master.csv");
    let export = write(dir.path(), "export.csv", EXPORT);

    hostbook(dir.path(), &master)
        .arg("import")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates."))
        .stdout(predicate::str::contains("Added 3 new bookings."));

    let content = std::fs::read_to_string(&master).unwrap();
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn reimport_reports_duplicates_and_adds_only_new_codes() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master.csv");
    let first = write(dir.path(), "first.csv", EXPORT);
    hostbook(dir.path(), &master).arg("import").arg(&first).assert().success();

    let second = write(
        dir.path(),
        "second.csv",
        "Booking ID,Reservation Date,Arrival Date,Departure Date,Revenue\n\
         HMA1,2025-01-02,2025-01-20,2025-01-23,450\n\
         HMD4,2025-03-01,2025-04-10,2025-04-12,300\n",
    );
    hostbook(dir.path(), &master)
        .arg("import")
        .arg(&second)
        .assert()
        .success()
        .stdout(predicate::str::contains("Potential Duplicates"))
        .stdout(predicate::str::contains("HMA1"))
        .stdout(predicate::str::contains("Added 1 new bookings."));

    let content = std::fs::read_to_string(&master).unwrap();
    assert_eq!(content.lines().count(), 5);
    assert!(content.trim_end().ends_with("HMD4"));
}

#[test]
fn import_missing_revenue_column_fails_and_leaves_master_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master.csv");
    let export = write(
        dir.path(),
        "bad.csv",
        "Confirmation Code,Booking date,Start date,End date\nX1,2025-01-01,2025-01-05,2025-01-06\n",
    );

    hostbook(dir.path(), &master)
        .arg("import")
        .arg(&export)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing expected columns: Gross Revenue"));

    assert!(!master.exists());
}

#[test]
fn import_messages_follow_language_flag() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master.csv");
    let export = write(dir.path(), "export.csv", EXPORT);

    hostbook(dir.path(), &master)
        .args(["--lang", "fr", "import"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Aucun doublon."))
        .stdout(predicate::str::contains("3 nouvelles réservations ajoutées."));
}

#[test]
fn dry_run_does_not_write_master() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master.csv");
    let export = write(dir.path(), "export.csv", EXPORT);

    hostbook(dir.path(), &master)
        .args(["import", "--dry-run"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: 3 bookings would be added."));

    assert!(!master.exists());
}

#[test]
fn dry_run_message_follows_language_flag() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master.csv");
    let export = write(dir.path(), "export.csv", EXPORT);

    hostbook(dir.path(), &master)
        .args(["--lang", "fr", "import", "--dry-run"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Simulation : 3 réservations seraient ajoutées."));
}

#[test]
fn repeated_code_in_one_file_is_listed_apart_from_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master.csv");
    let export = write(
        dir.path(),
        "export.csv",
        "Confirmation Code,Booking date,Start date,End date,Gross earnings\n\
         HMR1,2025-01-02,2025-01-20,2025-01-23,450\n\
         HMR1,2025-01-02,2025-01-20,2025-01-23,450\n",
    );

    hostbook(dir.path(), &master)
        .arg("import")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates."))
        .stdout(predicate::str::contains("Repeated in this file (kept first)"))
        .stdout(predicate::str::contains("Added 1 new bookings."));

    let content = std::fs::read_to_string(&master).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn dashboard_json_reflects_master_table() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master.csv");
    let export = write(dir.path(), "export.csv", EXPORT);
    hostbook(dir.path(), &master).arg("import").arg(&export).assert().success();

    let output = hostbook(dir.path(), &master)
        .args(["report", "dashboard", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let dash: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(dash["bookings"], 3);
    assert_eq!(dash["total_revenue"].as_f64(), Some(1180.5));
    let months: Vec<&str> = dash["monthly"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["month"].as_str().unwrap())
        .collect();
    assert_eq!(months, vec!["2025-01", "2025-02", "2025-03"]);
    assert_eq!(dash["lead_time"]["total"], 3);
    assert_eq!(dash["recent"][0]["confirmation_code"], "HMC3");
}

#[test]
fn report_on_empty_master_says_nothing_to_show() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master.csv");

    hostbook(dir.path(), &master)
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No new bookings to add."));
}

#[test]
fn demo_export_imports_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master.csv");
    let demo = dir.path().join("demo.csv");

    hostbook(dir.path(), &master)
        .arg("demo")
        .arg("--output")
        .arg(&demo)
        .assert()
        .success()
        .stdout(predicate::str::contains("sample bookings"));

    hostbook(dir.path(), &master)
        .arg("import")
        .arg(&demo)
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates."));

    hostbook(dir.path(), &master)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bookings:   45"));
}
