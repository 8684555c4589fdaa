use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn zenbudget(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("zenbudget").unwrap();
    cmd.env("ZENBUDGET_DATA_DIR", data_dir.path())
        .env_remove("ZENBUDGET_USER")
        .env_remove("ZENBUDGET_AI_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn init(data_dir: &TempDir, user: &str) {
    zenbudget(data_dir)
        .args(["--user", user, "init", "--name", "Alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget document ready"));
}

#[test]
fn init_creates_settings_and_document() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");

    assert!(dir.path().join("config.json").exists());
    let document = dir.path().join("data").join("users").join("alice.json");
    let content = std::fs::read_to_string(document).unwrap();
    assert!(content.contains("\"displayName\": \"Alice\""));
}

#[test]
fn init_rejects_path_like_user() {
    let dir = TempDir::new().unwrap();
    zenbudget(&dir)
        .args(["--user", "../escape", "init"])
        .assert()
        .failure();
}

#[test]
fn expense_set_then_list() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");

    zenbudget(&dir)
        .args(["-u", "alice", "expense", "set", "2025-03-14", "120.50", "--note", "Groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03-14: spent ₹120.50"));

    zenbudget(&dir)
        .args(["-u", "alice", "expense", "list", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Total: ₹120.50"));
}

#[test]
fn expense_add_accumulates() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");

    zenbudget(&dir)
        .args(["-u", "alice", "expense", "add", "40", "--date", "2025-05-02", "--note", "Lunch"])
        .assert()
        .success();
    zenbudget(&dir)
        .args(["-u", "alice", "expense", "add", "10", "--date", "2025-05-02", "--note", "Tea"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spent ₹50.00 (added ₹10.00)"));

    zenbudget(&dir)
        .args(["-u", "alice", "expense", "list", "-m", "2025-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch; Tea"));
}

#[test]
fn invalid_date_fails() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");

    zenbudget(&dir)
        .args(["-u", "alice", "expense", "set", "14/03/2025", "10"])
        .assert()
        .failure();
}

#[test]
fn negative_amount_fails() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");

    zenbudget(&dir)
        .args(["-u", "alice", "expense", "set", "2025-03-14", "--", "-5"])
        .assert()
        .failure();
}

#[test]
fn clearing_missing_day_fails() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");

    zenbudget(&dir)
        .args(["-u", "alice", "expense", "clear", "2025-03-14"])
        .assert()
        .failure();
}

#[test]
fn budget_override_shows_in_report() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");

    zenbudget(&dir)
        .args(["-u", "alice", "budget", "set", "2025-02", "2800"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget for February 2025 set to ₹2800.00"));

    zenbudget(&dir)
        .args(["-u", "alice", "budget", "show", "2025-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("₹2800.00 (custom)"));

    zenbudget(&dir)
        .args(["-u", "alice", "report", "month", "2025-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Month Report - February 2025"))
        .stdout(predicate::str::contains("₹2800.00"));
}

#[test]
fn report_month_writes_csv() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");
    let output = dir.path().join("feb.csv");

    zenbudget(&dir)
        .args(["-u", "alice", "expense", "set", "2025-01-10", "3000"])
        .assert()
        .success();
    zenbudget(&dir)
        .args(["-u", "alice", "expense", "set", "2025-02-01", "150", "-n", "Concert"])
        .assert()
        .success();
    zenbudget(&dir)
        .args(["-u", "alice", "report", "month", "2025-02", "-o"])
        .arg(&output)
        .assert()
        .success();

    let csv = std::fs::read_to_string(output).unwrap();
    assert!(csv.contains("2025-02-01,150.00,150.00,3050.00,true,Concert"));
}

#[test]
fn fixed_add_and_list() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");

    zenbudget(&dir)
        .args(["-u", "alice", "fixed", "add", "2025-04", "Rent", "900", "--note", "Flat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged Rent ₹900.00 for April 2025 [fx-"));

    zenbudget(&dir)
        .args(["-u", "alice", "fixed", "list", "2025-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flat"))
        .stdout(predicate::str::contains("Total: ₹900.00"));
}

#[test]
fn fixed_rejects_unknown_category() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");

    zenbudget(&dir)
        .args(["-u", "alice", "fixed", "add", "2025-04", "Yacht", "900"])
        .assert()
        .failure();
}

#[test]
fn export_csv_to_file() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");
    let output = dir.path().join("out.csv");

    zenbudget(&dir)
        .args(["-u", "alice", "expense", "set", "2025-03-14", "12"])
        .assert()
        .success();
    zenbudget(&dir)
        .args(["-u", "alice", "export", "csv", "--year", "2025", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 rows for 2025"));

    let csv = std::fs::read_to_string(output).unwrap();
    assert!(csv.starts_with("Date,Type,Category,Amount,Note"));
    assert!(csv.contains("2025-03-14"));
}

#[test]
fn export_json_round_trips_document() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");
    let output = dir.path().join("full.json");

    zenbudget(&dir)
        .args(["-u", "alice", "export", "json", "--pretty"])
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
    assert_eq!(json["user"], "alice");
    assert_eq!(json["state"]["displayName"], "Alice");
}

#[test]
fn history_lists_changes_for_user() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");
    init(&dir, "bob");

    zenbudget(&dir)
        .args(["-u", "alice", "expense", "set", "2025-03-14", "12"])
        .assert()
        .success();
    zenbudget(&dir)
        .args(["-u", "bob", "budget", "default", "5000"])
        .assert()
        .success();

    zenbudget(&dir)
        .args(["-u", "alice", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Expense 2025-03-14"))
        .stdout(predicate::str::contains("by bob").not());

    zenbudget(&dir)
        .args(["-u", "alice", "history", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("by bob"));
}

#[test]
fn users_lists_profiles() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");
    init(&dir, "bob");

    zenbudget(&dir)
        .args(["-u", "bob", "users"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  alice"))
        .stdout(predicate::str::contains("* bob"));
}

#[test]
fn insight_without_key_prints_hint() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");

    zenbudget(&dir)
        .args(["-u", "alice", "insight"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ZENBUDGET_AI_KEY"));
}

#[test]
fn scan_without_ai_fails() {
    let dir = TempDir::new().unwrap();
    init(&dir, "alice");
    let image = dir.path().join("receipt.png");
    std::fs::write(&image, [0u8; 8]).unwrap();

    zenbudget(&dir)
        .args(["-u", "alice", "scan"])
        .arg(&image)
        .assert()
        .failure();
}
