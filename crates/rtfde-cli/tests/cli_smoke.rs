use assert_cmd::Command;
use predicates::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Deserialize)]
struct Fixture {
    original: Value,
    revised: Value,
    tree_diff: String,
    value_diff: String,
}

fn load_fixture(name: &str) -> Fixture {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../rtfde-core/tests/fixtures/tree_diff")
        .join(format!("{name}.json"));
    let data = fs::read_to_string(path).expect("fixture readable");
    serde_json::from_str(&data).expect("fixture deserializes")
}

fn write_tempfile(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create tempfile");
    write!(file, "{contents}").expect("write tempfile");
    file
}

fn rtfde() -> Command {
    let mut cmd = Command::cargo_bin("rtfde").expect("binary rtfde should be built");
    cmd.env_remove("RTFDE_LOG");
    cmd
}

#[test]
fn help_succeeds() {
    rtfde()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("htmlrtf_stripping"));
}

#[test]
fn version_banner_names_binary() {
    rtfde().arg("--version").assert().success().stdout(predicate::str::starts_with("rtfde "));
}

#[test]
fn encode_param_pads_to_four_digits() {
    rtfde()
        .args(["encode-param", "10"])
        .assert()
        .success()
        .stdout("0x000a\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn encode_param_keeps_sign_outside_padding() {
    rtfde().args(["encode-param", "--", "-10"]).assert().success().stdout("-0x00a\n");
}

#[test]
fn encode_param_rejects_non_integers() {
    rtfde()
        .args(["encode-param", "12pt"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("\"12pt\""));
}

#[test]
fn encode_param_reports_oversized_values() {
    let huge = format!("1{}", "0".repeat(40));
    rtfde()
        .args(["encode-param", huge.as_str()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not fit in a 128-bit integer"));
}

#[test]
fn escape_reads_stdin() {
    rtfde()
        .arg("escape")
        .write_stdin("{\\b bold}")
        .assert()
        .success()
        .stdout("\\'7b\\'5cb bold\\'7d");
}

#[test]
fn escape_logs_rewrite_on_transform_channel() {
    rtfde()
        .args(["--log", "transform=debug", "escape"])
        .write_stdin("a}")
        .assert()
        .success()
        .stdout("a\\'7d")
        .stderr(predicate::str::contains("rtfde::transform"))
        .stderr(predicate::str::contains("! a}"));
}

#[test]
fn diff_of_changed_files_exits_one() {
    let original = write_tempfile("a\nb\n");
    let revised = write_tempfile("a\nc\n");
    rtfde()
        .arg("diff")
        .arg(original.path())
        .arg(revised.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("! b\n"))
        .stdout(predicate::str::contains("! c\n"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn diff_of_identical_files_is_silent() {
    let original = write_tempfile("same\n");
    let revised = write_tempfile("same\n");
    rtfde()
        .arg("diff")
        .arg(original.path())
        .arg(revised.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn diff_with_separator_ignores_empty_units() {
    let original = write_tempfile("a,b,,c");
    let revised = write_tempfile("a,\nb,c");
    rtfde()
        .arg("diff")
        .arg(original.path())
        .arg(revised.path())
        .args(["--sep", ","])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn diff_rejects_invalid_separator() {
    let file = write_tempfile("x");
    rtfde()
        .arg("diff")
        .arg(file.path())
        .arg(file.path())
        .args(["--sep", "("])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid --sep pattern"));
}

#[test]
fn tree_diff_matches_fixture() {
    let fixture = load_fixture("htmlrtf_stripped");
    let original = write_tempfile(&fixture.original.to_string());
    let revised = write_tempfile(&fixture.revised.to_string());
    rtfde()
        .arg("tree-diff")
        .arg(original.path())
        .arg(revised.path())
        .assert()
        .code(1)
        .stdout(fixture.tree_diff)
        .stderr(predicate::str::is_empty());
}

#[test]
fn tree_diff_values_matches_fixture() {
    let fixture = load_fixture("htmlrtf_stripped");
    let original = write_tempfile(&fixture.original.to_string());
    let revised = write_tempfile(&fixture.revised.to_string());
    rtfde()
        .arg("tree-diff")
        .arg("--values")
        .arg(original.path())
        .arg(revised.path())
        .assert()
        .code(1)
        .stdout(fixture.value_diff);
}

#[test]
fn tree_diff_reports_malformed_json() {
    let broken = write_tempfile("{\"tag\":");
    rtfde()
        .arg("tree-diff")
        .arg(broken.path())
        .arg(broken.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to parse tree JSON"));
}

#[test]
fn flatten_prints_labels_and_tokens() {
    let fixture = load_fixture("htmlrtf_stripped");
    let revised = write_tempfile(&fixture.revised.to_string());
    rtfde().arg("flatten").arg(revised.path()).assert().success().stdout(
        "Tree('document')\n\
         Token('TEXT', 'shown', line=1, end_line=1, start_pos=25, end_pos=30)\n",
    );
}

#[test]
fn flatten_values_prints_leaves_only() {
    let fixture = load_fixture("htmlrtf_stripped");
    let original = write_tempfile(&fixture.original.to_string());
    rtfde()
        .args(["flatten", "--values"])
        .arg(original.path())
        .assert()
        .success()
        .stdout("\\htmlrtf\nhidden\n\\htmlrtf0\nshown\n");
}

#[test]
fn codeword_exit_code_reflects_match() {
    rtfde().args(["codeword", "\\fs24", "\\fs"]).assert().success().stdout("true\n");
    rtfde().args(["codeword", "\\fsx", "\\fs"]).assert().code(1).stdout("false\n");
}

#[test]
fn invalid_log_directive_fails() {
    rtfde()
        .args(["--log", "bogus=debug", "encode-param", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid log directives"));
}

#[test]
fn log_directives_fall_back_to_environment() {
    let mut cmd = Command::cargo_bin("rtfde").expect("binary rtfde should be built");
    cmd.env("RTFDE_LOG", "validation=nonsense")
        .args(["encode-param", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("validation=nonsense"));
}
