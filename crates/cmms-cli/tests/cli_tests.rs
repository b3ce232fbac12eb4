//! CLI integration tests
//!
//! Each test runs the `cmms` binary against a store in a fresh temp directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(temp_dir: &TempDir, args: &[&str]) -> Output {
    let data_dir = data_dir(temp_dir);
    Command::new(env!("CARGO_BIN_EXE_cmms"))
        .current_dir(temp_dir.path())
        .env("CMMS_LOGGING__PROFILE", "test")
        .arg("--data-dir")
        .arg(&data_dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn data_dir(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("data")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn list_json(temp_dir: &TempDir, entity: &str) -> Vec<serde_json::Value> {
    let stdout = stdout_of(&run_cli(temp_dir, &["list", entity, "--json"]));
    serde_json::from_str(&stdout).expect("list --json prints a JSON array")
}

fn files_in(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_init_seeds_then_restores() {
    // Given: An empty data directory
    let temp_dir = TempDir::new().unwrap();

    // When: init runs twice
    let first = stdout_of(&run_cli(&temp_dir, &["init"]));
    let second = stdout_of(&run_cli(&temp_dir, &["init"]));

    // Then: The first run seeds and persists, the second restores
    assert!(first.contains("outcome: seeded"), "stdout: {}", first);
    assert!(second.contains("outcome: restored"), "stdout: {}", second);
    assert!(data_dir(&temp_dir).join("cmms_database.json").exists());
}

#[test]
fn test_list_json_returns_seeded_records() {
    let temp_dir = TempDir::new().unwrap();

    let equipments = list_json(&temp_dir, "equipments");
    let technicians = list_json(&temp_dir, "technicians");
    let parts = list_json(&temp_dir, "spare-parts");

    assert_eq!(equipments.len(), 4);
    assert_eq!(technicians.len(), 3);
    assert_eq!(parts.len(), 4);
    assert_eq!(equipments[0]["name"], "Linac Elekta Infinity");
}

#[test]
fn test_list_unknown_entity_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(&temp_dir, &["list", "robots"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {}", stderr);
    assert!(stderr.contains("robots"), "stderr: {}", stderr);
}

#[test]
fn test_equipment_add_is_listed() {
    let temp_dir = TempDir::new().unwrap();

    let stdout = stdout_of(&run_cli(
        &temp_dir,
        &[
            "equipment",
            "add",
            "--name",
            "Linac Elekta Harmony",
            "--model",
            "Harmony",
            "--serial",
            "HRM-2024-001",
            "--commissioned",
            "2024-02-01",
            "--status",
            "En Maintenance",
        ],
    ));
    let id = stdout.trim().to_string();

    assert!(id.starts_with("eq-"), "id: {}", id);
    let equipments = list_json(&temp_dir, "equipments");
    assert_eq!(equipments.len(), 5);
    let added = equipments
        .iter()
        .find(|e| e["id"] == id.as_str())
        .expect("added equipment is listed");
    assert_eq!(added["status"], "En Maintenance");
    assert_eq!(added["serialNumber"], "HRM-2024-001");
}

#[test]
fn test_equipment_add_rejects_bad_date() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(
        &temp_dir,
        &[
            "equipment",
            "add",
            "--name",
            "X",
            "--model",
            "Y",
            "--serial",
            "Z",
            "--commissioned",
            "01/02/2024",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(list_json(&temp_dir, "equipments").len(), 4);
}

#[test]
fn test_ticket_open_and_resolve() {
    let temp_dir = TempDir::new().unwrap();

    // Given: A newly opened ticket
    let stdout = stdout_of(&run_cli(
        &temp_dir,
        &[
            "ticket",
            "open",
            "--subject",
            "Écran noir",
            "--equipment",
            "eq-001",
            "--priority",
            "high",
        ],
    ));
    let id = stdout.split_whitespace().next().unwrap().to_string();
    assert!(stdout.contains("TKT-"), "stdout: {}", stdout);

    // When: Its status is set to resolved
    stdout_of(&run_cli(&temp_dir, &["ticket", "status", &id, "resolved"]));

    // Then: The listing shows it resolved with a resolution date
    let tickets = list_json(&temp_dir, "tickets");
    assert_eq!(tickets.len(), 4);
    let ticket = tickets.iter().find(|t| t["id"] == id.as_str()).unwrap();
    assert_eq!(ticket["status"], "Résolu");
    assert_eq!(ticket["priority"], "Haute");
    assert!(ticket["resolvedDate"].is_string());
}

#[test]
fn test_ticket_status_on_missing_ticket_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(&temp_dir, &["ticket", "status", "tkt-missing", "resolved"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_downtime_start_and_resolve() {
    let temp_dir = TempDir::new().unwrap();

    let stdout = stdout_of(&run_cli(
        &temp_dir,
        &[
            "downtime",
            "start",
            "--equipment",
            "eq-002",
            "--reason",
            "Coupure réseau",
            "--at",
            "2024-03-01T08:00:00",
        ],
    ));
    let id = stdout.trim().to_string();
    assert!(id.starts_with("dt-"), "id: {}", id);

    let resolved = stdout_of(&run_cli(&temp_dir, &["downtime", "resolve", &id]));
    assert!(resolved.contains("Résolu"), "stdout: {}", resolved);

    let downtimes = list_json(&temp_dir, "downtimes");
    let downtime = downtimes.iter().find(|d| d["id"] == id.as_str()).unwrap();
    assert_eq!(downtime["status"], "Résolu");
    assert!(downtime["end"].is_string());
}

#[test]
fn test_part_add_coerces_quantity() {
    let temp_dir = TempDir::new().unwrap();

    let stdout = stdout_of(&run_cli(
        &temp_dir,
        &[
            "part",
            "add",
            "--name",
            "Fusible 10A",
            "--part-number",
            "FUS-010",
            "--quantity",
            "0",
            "--location",
            "Armoire D4",
            "--acquired",
            "2024-02-10",
        ],
    ));

    assert!(stdout.trim().ends_with("x1"), "stdout: {}", stdout);
    let parts = list_json(&temp_dir, "spare-parts");
    let part = parts.iter().find(|p| p["partNumber"] == "FUS-010").unwrap();
    assert_eq!(part["quantity"], 1);
    assert_eq!(part["acquisitionDate"], "2024-02-10");
    assert!(part["installationDate"].is_null());
}

#[test]
fn test_export_snapshot_writes_dated_file() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("backups");

    let stdout = stdout_of(&run_cli(
        &temp_dir,
        &["export", "snapshot", "--out", out.to_str().unwrap()],
    ));

    assert!(stdout.contains("sha256:"), "stdout: {}", stdout);
    let files = files_in(&out);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("cmms-backup-"));
    assert!(files[0].ends_with(".sqlite"));
    let bytes = fs::read(out.join(&files[0])).unwrap();
    assert!(bytes.starts_with(b"SQLite format 3\0"));
}

#[test]
fn test_export_csv_writes_table() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("csv");

    stdout_of(&run_cli(
        &temp_dir,
        &["export", "csv", "equipments", "--out", out.to_str().unwrap()],
    ));

    let csv = fs::read_to_string(out.join("equipements.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(csv.contains("VHD-2023-001"));
}

#[test]
fn test_dashboard_json_counts() {
    let temp_dir = TempDir::new().unwrap();

    let stdout = stdout_of(&run_cli(&temp_dir, &["dashboard", "--json"]));
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(summary["totalEquipments"], 4);
    assert_eq!(summary["downEquipments"], 1);
    assert_eq!(summary["openTickets"], 2);
    assert_eq!(summary["highPriorityOpenTickets"], 1);
    assert!(summary["recentTickets"].is_array());
}

#[test]
fn test_corrupt_image_requires_explicit_recovery() {
    // Given: A store whose persisted image was damaged
    let temp_dir = TempDir::new().unwrap();
    stdout_of(&run_cli(&temp_dir, &["init"]));
    let image_path = data_dir(&temp_dir).join("cmms_database.json");
    fs::write(&image_path, "garbage").unwrap();

    // When: init runs without --recover
    let refused = run_cli(&temp_dir, &["init"]);

    // Then: It fails and leaves the payload alone
    assert_eq!(refused.status.code(), Some(1));
    assert_eq!(fs::read_to_string(&image_path).unwrap(), "garbage");

    // When: init runs with --recover
    let recovered = stdout_of(&run_cli(&temp_dir, &["init", "--recover"]));

    // Then: The store is recreated and the damaged payload is kept aside
    assert!(recovered.contains("outcome: recovered"), "stdout: {}", recovered);
    let aside: Vec<String> = files_in(&data_dir(&temp_dir))
        .into_iter()
        .filter(|name| name.starts_with("cmms_database.corrupt-"))
        .collect();
    assert_eq!(aside.len(), 1);
    assert_eq!(
        fs::read_to_string(data_dir(&temp_dir).join(&aside[0])).unwrap(),
        "garbage"
    );
    assert_eq!(list_json(&temp_dir, "equipments").len(), 4);
}

#[test]
fn test_config_file_sets_storage_key() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("cmms.toml"),
        "[store]\nstorage_key = \"site_b\"\n",
    )
    .unwrap();

    stdout_of(&run_cli(&temp_dir, &["init"]));

    assert!(data_dir(&temp_dir).join("site_b.json").exists());
    assert!(!data_dir(&temp_dir).join("cmms_database.json").exists());
}
