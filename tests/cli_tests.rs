use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn smile_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("smile"));
    cmd.env_remove("MADEMESMILE_BASE_URL")
        .env_remove("MADEMESMILE_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn init_journal() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    smile_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();
    temp_dir
}

/// Create a moment and return its id.
fn create(dir: &TempDir, args: &[&str]) -> String {
    let output = smile_cmd()
        .arg("create")
        .args(args)
        .arg("--json")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "create failed: {:?}", output);
    let moment: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    moment["id"].as_str().unwrap().to_string()
}

fn list_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = smile_cmd()
        .arg("list")
        .args(args)
        .arg("--json")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    smile_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("moments that made you smile"));
}

#[test]
fn test_version() {
    smile_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("smile"));
}

#[test]
fn test_not_initialized_error() {
    let temp_dir = TempDir::new().unwrap();

    smile_cmd()
        .arg("list")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("smile init"));
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_creates_config() {
    let temp_dir = init_journal();

    assert!(temp_dir.path().join(".smile.yml").exists());
    assert!(temp_dir.path().join(".mademesmile").exists());

    let config = std::fs::read_to_string(temp_dir.path().join(".smile.yml")).unwrap();
    assert!(config.contains("backend: local"));
}

#[test]
fn test_init_twice_fails() {
    let temp_dir = init_journal();

    smile_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_init_document_requires_project() {
    let temp_dir = TempDir::new().unwrap();

    smile_cmd()
        .args(["init", "--backend", "document"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--project-id"));
}

// =============================================================================
// Create, List, Show, Delete
// =============================================================================

#[test]
fn test_create_and_list() {
    let temp_dir = init_journal();

    smile_cmd()
        .args(["create", "Coffee with mom", "--category", "family"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    smile_cmd()
        .arg("list")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee with mom"))
        .stdout(predicate::str::contains("family"));

    assert!(
        temp_dir
            .path()
            .join(".mademesmile")
            .join("%40mademesmile%3Amoments.json")
            .exists()
    );
}

#[test]
fn test_list_empty() {
    let temp_dir = init_journal();

    smile_cmd()
        .arg("list")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No moments yet"));
}

#[test]
fn test_create_requires_text() {
    let temp_dir = init_journal();

    smile_cmd()
        .args(["create", "   "])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please write something"));

    assert_eq!(list_json(&temp_dir, &[]).as_array().unwrap().len(), 0);
}

#[test]
fn test_create_rejects_overlong_text() {
    let temp_dir = init_journal();
    let long = "x".repeat(281);

    smile_cmd()
        .args(["create", &long])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum length"));
}

#[test]
fn test_create_uses_default_category() {
    let temp_dir = init_journal();
    create(&temp_dir, &["No category given"]);

    let moments = list_json(&temp_dir, &[]);
    assert_eq!(moments[0]["category"], "random");
    assert_eq!(moments[0]["mediaType"], "text");
}

#[test]
fn test_create_with_media_infers_type() {
    let temp_dir = init_journal();
    create(&temp_dir, &["Beach day", "--media", "clips/beach.mp4"]);

    let moments = list_json(&temp_dir, &[]);
    assert_eq!(moments[0]["mediaType"], "video");
    assert_eq!(moments[0]["mediaUrl"], "clips/beach.mp4");
}

#[test]
fn test_list_newest_first() {
    let temp_dir = init_journal();
    let first = create(&temp_dir, &["first"]);
    let second = create(&temp_dir, &["second"]);

    let moments = list_json(&temp_dir, &[]);
    assert_eq!(moments[0]["id"], second.as_str());
    assert_eq!(moments[1]["id"], first.as_str());
}

#[test]
fn test_category_filter() {
    let temp_dir = init_journal();
    create(&temp_dir, &["one", "-c", "family"]);
    create(&temp_dir, &["two", "-c", "work"]);
    create(&temp_dir, &["three", "-c", "family"]);

    let query = list_json(&temp_dir, &["--category", "family"]);
    assert_eq!(query["strategy"], "in-memory");
    let moments = query["moments"].as_array().unwrap();
    assert_eq!(moments.len(), 2);
    assert!(moments.iter().all(|m| m["category"] == "family"));
}

#[test]
fn test_collection_filter() {
    let temp_dir = init_journal();
    create(&temp_dir, &["summer", "--collection", "Summer 2026"]);
    create(&temp_dir, &["other"]);

    let moments = list_json(&temp_dir, &["--collection", "Summer 2026"]);
    assert_eq!(moments.as_array().unwrap().len(), 1);
    assert_eq!(moments[0]["content"], "summer");
}

#[test]
fn test_show_and_delete() {
    let temp_dir = init_journal();
    let id = create(
        &temp_dir,
        &["Round trip", "-c", "family", "--tag", "a", "--tag", "b"],
    );

    smile_cmd()
        .args(["show", &id])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Round trip"))
        .stdout(predicate::str::contains("a, b"));

    smile_cmd()
        .args(["delete", &id, "--force"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    smile_cmd()
        .args(["show", &id])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be found"));
}

#[test]
fn test_delete_prompt_cancel() {
    let temp_dir = init_journal();
    let id = create(&temp_dir, &["keep me"]);

    smile_cmd()
        .args(["delete", &id])
        .write_stdin("n\n")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    assert_eq!(list_json(&temp_dir, &[]).as_array().unwrap().len(), 1);
}

#[test]
fn test_delete_unknown_id_is_silent() {
    let temp_dir = init_journal();

    smile_cmd()
        .args(["delete", "does-not-exist", "--json"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));
}

// =============================================================================
// Search, Stats, Categories
// =============================================================================

#[test]
fn test_search() {
    let temp_dir = init_journal();
    create(&temp_dir, &["Sunset at the beach", "--tag", "ocean"]);
    create(&temp_dir, &["Coffee with mom"]);

    smile_cmd()
        .args(["search", "BEACH"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 results"))
        .stdout(predicate::str::contains("Sunset"));

    smile_cmd()
        .args(["search", "tag:ocean", "--json"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sunset at the beach"));
}

#[test]
fn test_stats_json() {
    let temp_dir = init_journal();
    create(&temp_dir, &["one", "-c", "family"]);
    create(&temp_dir, &["two", "-c", "work"]);
    create(&temp_dir, &["three", "-c", "family"]);

    let output = smile_cmd()
        .args(["stats", "--json", "--activity", "7"])
        .current_dir(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["stats"]["totalMoments"], 3);
    assert_eq!(json["stats"]["categoryCounts"]["family"], 2);
    assert_eq!(json["stats"]["categoryCounts"]["work"], 1);
    assert_eq!(json["stats"]["currentStreak"], 1);
    assert_eq!(json["activity"].as_array().unwrap().len(), 7);
}

#[test]
fn test_stats_activity_window_bounds() {
    let temp_dir = init_journal();

    for days in ["0", "100000"] {
        smile_cmd()
            .args(["stats", "--activity", days])
            .current_dir(temp_dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("1..=366"));
    }

    let output = smile_cmd()
        .args(["stats", "--json", "--activity", "366"])
        .current_dir(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["activity"].as_array().unwrap().len(), 366);
}

#[test]
fn test_bare_log_file_flag_logs_into_journal() {
    let temp_dir = init_journal();

    smile_cmd()
        .args(["list", "--log-file"])
        .current_dir(temp_dir.path())
        .assert()
        .success();
    assert!(temp_dir.path().join(".mademesmile").join("logs").is_dir());
}

#[test]
fn test_stats_text() {
    let temp_dir = init_journal();
    create(&temp_dir, &["one"]);

    smile_cmd()
        .arg("stats")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total"))
        .stdout(predicate::str::contains("Longest streak"));
}

#[test]
fn test_categories_seeded() {
    let temp_dir = init_journal();

    smile_cmd()
        .arg("categories")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("family"))
        .stdout(predicate::str::contains("Friends"));

    assert!(
        temp_dir
            .path()
            .join(".mademesmile")
            .join("%40mademesmile%3Acategories.json")
            .exists()
    );
}

// =============================================================================
// Session state
// =============================================================================

#[test]
fn test_onboarding_flag() {
    let temp_dir = init_journal();

    smile_cmd()
        .args(["onboarding", "status"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("pending"));

    smile_cmd()
        .args(["onboarding", "complete"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    smile_cmd()
        .args(["onboarding", "status"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));

    smile_cmd()
        .args(["onboarding", "reset"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    smile_cmd()
        .args(["onboarding", "status"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("pending"));
}

#[test]
fn test_use_token_and_logout() {
    let temp_dir = init_journal();

    smile_cmd()
        .args(["auth", "use-token", "id-token", "--user-id", "uid-1"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    smile_cmd()
        .args(["auth", "whoami", "--json"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("uid-1"));

    smile_cmd()
        .args(["auth", "whoami"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Token:    stored"))
        .stdout(predicate::str::contains("Backend:  local"));

    smile_cmd()
        .args(["auth", "logout"])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    smile_cmd()
        .args(["auth", "whoami"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in (local backend)"));
}

#[test]
fn test_login_without_base_url() {
    let temp_dir = init_journal();

    smile_cmd()
        .args(["auth", "login", "--email", "a@b.co", "--password", "secret1"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("MADEMESMILE_BASE_URL"));
}
