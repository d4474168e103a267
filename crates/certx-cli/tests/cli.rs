use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// `certx` with the user config directory pointed at `home`.
fn certx(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("certx").unwrap();
    cmd.env("XDG_CONFIG_HOME", home).env_remove("RUST_LOG");
    cmd
}

fn write_documents(dir: &Path) {
    fs::write(dir.join("agent_2.txt"), "Pin Code\n411005\nWebsite URL\nwww.two.in\n").unwrap();
    fs::write(dir.join("agent_1.txt"), "First Name\nRAMESH\nMiddle Name\nLast Name\nPATIL\n").unwrap();
    fs::write(dir.join("notes.md"), "Pin Code 400001").unwrap();
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

#[test]
fn test_missing_input_shows_usage() {
    let home = TempDir::new().unwrap();
    certx(home.path())
        .arg("extract")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_invalid_input_path_fails() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("out.csv");

    certx(home.path())
        .arg("extract")
        .arg(home.path().join("missing.pdf"))
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please provide a valid PDF file"));

    assert!(!out.exists());
}

#[test]
fn test_empty_directory_writes_nothing() {
    let home = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    let out = home.path().join("out.csv");

    certx(home.path())
        .arg("extract")
        .arg(input.path())
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("No documents found"));

    assert!(!out.exists());
}

#[test]
fn test_directory_to_csv_in_sorted_order() {
    let home = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    write_documents(input.path());
    let out = home.path().join("agents.csv");
    fs::write(&out, "stale contents").unwrap();

    certx(home.path())
        .arg("extract")
        .arg(input.path())
        .arg(&out)
        .args(["-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data saved to"));

    let (headers, rows) = read_csv(&out);
    assert_eq!(headers.len(), 17);
    assert_eq!(headers.last().map(String::as_str), Some("Source File"));
    assert!(headers.contains(&"Contact Details".to_string()));

    let source: Vec<&str> = rows.iter().map(|r| r[16].as_str()).collect();
    assert_eq!(source, vec!["agent_1.txt", "agent_2.txt"]);

    let column = |name: &str| headers.iter().position(|h| h == name).unwrap();
    assert_eq!(rows[0][column("First Name")], "RAMESH");
    assert_eq!(rows[0][column("Middle Name")], "");
    assert_eq!(rows[0][column("Last Name")], "PATIL");
    assert_eq!(rows[1][column("Pin Code")], "411005");
    assert_eq!(rows[1][column("Website")], "www.two.in");
}

#[test]
fn test_single_job_matches_parallel_run() {
    let home = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    write_documents(input.path());
    fs::write(input.path().join("agent_0.pdf"), "not a pdf").unwrap();

    let sequential = home.path().join("sequential.csv");
    let parallel = home.path().join("parallel.csv");
    for (out, jobs) in [(&sequential, "1"), (&parallel, "4")] {
        certx(home.path())
            .arg("extract")
            .arg(input.path())
            .arg(out)
            .args(["-j", jobs, "--keep-failed"])
            .assert()
            .success()
            .stderr(predicate::str::contains("agent_0.pdf"));
    }

    let (_, rows) = read_csv(&sequential);
    let source: Vec<&str> = rows.iter().map(|r| r[16].as_str()).collect();
    assert_eq!(source, vec!["agent_0.pdf", "agent_1.txt", "agent_2.txt"]);
    assert_eq!(read_csv(&sequential), read_csv(&parallel));
}

#[test]
fn test_unreadable_documents_skipped_or_kept() {
    let home = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    fs::write(input.path().join("a.txt"), "Pin Code\n400001\n").unwrap();
    fs::write(input.path().join("b.pdf"), "not a pdf").unwrap();

    let out = home.path().join("skipped.csv");
    certx(home.path())
        .arg("extract")
        .arg(input.path())
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unreadable documents:").not())
        .stderr(predicate::str::contains("Unreadable documents:"))
        .stderr(predicate::str::contains("b.pdf"));
    let (_, rows) = read_csv(&out);
    assert_eq!(rows.len(), 1);

    let out = home.path().join("kept.csv");
    certx(home.path())
        .arg("extract")
        .arg(input.path())
        .arg(&out)
        .arg("--keep-failed")
        .assert()
        .success();
    let (_, rows) = read_csv(&out);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][16], "b.pdf");
    assert!(rows[1][..16].iter().all(String::is_empty));
}

#[test]
fn test_nothing_extracted_writes_nothing() {
    let home = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    fs::write(input.path().join("scan.pdf"), "not a pdf").unwrap();
    let out = home.path().join("out.csv");

    certx(home.path())
        .arg("extract")
        .arg(input.path())
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("No data could be extracted"));

    assert!(!out.exists());
}

#[test]
fn test_single_document_prints_record() {
    let home = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    let doc = input.path().join("agent_9.txt");
    fs::write(&doc, "Office Number\n02221234567\n").unwrap();

    certx(home.path())
        .arg("extract")
        .arg(&doc)
        .arg(home.path().join("one.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("=== agent_9.txt ==="))
        .stdout(predicate::str::contains("02221234567"));
}

#[test]
fn test_json_output() {
    let home = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    write_documents(input.path());
    let out = home.path().join("agents.json");

    certx(home.path())
        .arg("extract")
        .arg(input.path())
        .arg(&out)
        .args(["--format", "json"])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Source File"], "agent_1.txt");
    assert_eq!(rows[1]["Pin Code"], "411005");
}

#[test]
fn test_config_file_selects_field_set() {
    let home = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    fs::write(input.path().join("a.txt"), "Name RAJESH KUMAR\nPin Code 560001\n").unwrap();

    let config = home.path().join("certx.json");
    fs::write(&config, r#"{"extraction": {"field_set": "v2"}}"#).unwrap();
    let out = home.path().join("v2.csv");

    certx(home.path())
        .arg("-c")
        .arg(&config)
        .arg("extract")
        .arg(input.path())
        .arg(&out)
        .assert()
        .success();

    let (headers, rows) = read_csv(&out);
    assert_eq!(headers[0], "Name");
    assert!(headers.contains(&"Contact Number".to_string()));
    assert_eq!(rows[0][0], "RAJESH KUMAR");
}

#[test]
fn test_field_set_flag_overrides_config() {
    let home = TempDir::new().unwrap();
    let input = TempDir::new().unwrap();
    fs::write(input.path().join("a.txt"), "Pin Code 560001\n").unwrap();
    let out = home.path().join("v2.csv");

    certx(home.path())
        .arg("extract")
        .arg(input.path())
        .arg(&out)
        .args(["--field-set", "v2"])
        .assert()
        .success();

    let (headers, _) = read_csv(&out);
    assert_eq!(headers.len(), 18);

    certx(home.path())
        .arg("extract")
        .arg(input.path())
        .arg(&out)
        .args(["--field-set", "v3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field set"));
}

#[test]
fn test_fields_lists_columns() {
    let home = TempDir::new().unwrap();
    certx(home.path())
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact Details (field Office Number)"))
        .stdout(predicate::str::contains("Line rules:"));
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("nested").join("certx.json");

    certx(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "batch.jobs", "2"])
        .assert()
        .success();

    certx(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "batch.jobs"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));

    certx(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "batch.nope", "1"])
        .assert()
        .failure();
}
