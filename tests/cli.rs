//! CLI integration tests for pfe
//!
//! Tests the binary as a user would interact with it.

use assert_cmd::Command;
use predicates::prelude::*;

fn pfe() -> Command {
    let mut cmd = Command::cargo_bin("pfe").unwrap();
    cmd.env_remove("PFE_LOG").env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help() {
    pfe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Prime factorization encoding"));
}

#[test]
fn test_version() {
    pfe()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pfe"));
}

#[test]
fn test_config_shows_defaults() {
    pfe()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("width = 7"))
        .stdout(predicate::str::contains("max_depth = 32"));
}

#[test]
fn test_config_json() {
    pfe()
        .args(["config", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_run\": 1048576"));
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_encode_argument() {
    pfe()
        .args(["encode", "a"])
        .assert()
        .success()
        .stdout("[2]'1'(1'3)\n");
}

#[test]
fn test_encode_stdin_drops_trailing_newline() {
    pfe()
        .arg("encode")
        .write_stdin("hi\n")
        .assert()
        .success()
        .stdout("[2]'1'(2)'3'[1'0]'1'1'1'0\n");
}

#[test]
fn test_encode_show_raw() {
    pfe()
        .args(["encode", "--show-raw", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("raw pfe:        0'0'0'0'1'(1'3)"))
        .stdout(predicate::str::contains("simplified pfe: [2]'1'(1'3)"));
}

#[test]
fn test_encode_quiet_show_raw() {
    pfe()
        .args(["encode", "--quiet", "--show-raw", "a"])
        .assert()
        .success()
        .stdout("0'0'0'0'1'(1'3)\n[2]'1'(1'3)\n");
}

#[test]
fn test_encode_lowercase() {
    pfe()
        .args(["encode", "--lowercase", "A"])
        .assert()
        .success()
        .stdout("[2]'1'(1'3)\n");
}

#[test]
fn test_decode_argument() {
    pfe()
        .args(["decode", "[2]'1'(2)'3'[1'0]'1'1'1'0"])
        .assert()
        .success()
        .stdout("hi\n");
}

#[test]
fn test_roundtrip_through_stdin() {
    let text = "Prime factors, all the way down.";
    let output = pfe().args(["encode", text]).output().unwrap();
    assert!(output.status.success());

    pfe()
        .arg("decode")
        .write_stdin(output.stdout)
        .assert()
        .success()
        .stdout(format!("{}\n", text));
}

#[test]
fn test_encode_from_file() {
    let path = std::env::temp_dir().join(format!("pfe-cli-{}.txt", std::process::id()));
    std::fs::write(&path, "a\n").unwrap();

    pfe()
        .args(["encode", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout("[2]'1'(1'3)\n");

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_encode_beyond_table_fails() {
    pfe()
        .args(["encode", "✓"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn test_decode_malformed_fails() {
    pfe()
        .args(["--no-color", "decode", "[2'1'(1'3)"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed input"))
        .stderr(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_decode_unknown_block_fails() {
    pfe()
        .args(["decode", "9'9'9'9'9'9'9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown character block"));
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_number_encode() {
    pfe()
        .args(["number", "12"])
        .assert()
        .success()
        .stdout("1'2\n");
}

#[test]
fn test_number_sentinels() {
    pfe().args(["number", "0"]).assert().success().stdout("()\n");
    pfe().args(["number", "1"]).assert().success().stdout("0\n");
}

#[test]
fn test_number_decode() {
    pfe()
        .args(["number", "--decode", "1'(3)'1"])
        .assert()
        .success()
        .stdout("58\n");
}

#[test]
fn test_number_show_raw() {
    pfe()
        .args(["number", "-q", "--show-raw", "58"])
        .assert()
        .success()
        .stdout("1'0'0'0'0'0'0'0'0'1\n1'(3)'1\n");
}

#[test]
fn test_number_negative_fails() {
    pfe()
        .args(["number", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("negative"));
}

#[test]
fn test_number_large_prime_fails_cleanly() {
    pfe()
        .args(["number", "18446744073709551557"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid argument"))
        .stderr(predicate::str::contains("exponent slots"));
}

#[test]
fn test_number_exponent_too_large_fails() {
    pfe()
        .args(["number", "1024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
}

// ============================================================================
// Dictionary
// ============================================================================

#[test]
fn test_dict_lists_table() {
    pfe()
        .arg("dict")
        .assert()
        .success()
        .stdout(predicate::str::contains(" 97  'a'       0'0'0'0'1'(1'3)"));
}

#[test]
fn test_dict_json() {
    pfe()
        .args(["dict", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"width\": 7"))
        .stdout(predicate::str::contains("\"notation\": \"0'0'0'0'0'0'()\""));
}

// ============================================================================
// Interactive
// ============================================================================

#[test]
fn test_interactive_is_default() {
    pfe()
        .write_stdin("1\na\n\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("simplified pfe: [2]'1'(1'3)"));
}

#[test]
fn test_interactive_stops_at_end_of_input() {
    pfe()
        .arg("interactive")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("4. leave"));
}
