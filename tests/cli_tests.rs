use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const BAND: &str = r#"
band: Cream
members:
  - name: Jack Bruce
    instrument: bass
    born: 1943
  - name: Ginger Baker
    instrument: drums
    born: 1939
  - name: Eric Clapton
    instrument: guitar
    born: 1945
"#;

struct Fixture {
    home: TempDir,
    band: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let band = home.path().join("band.yaml");
        fs::write(&band, BAND).unwrap();
        Fixture { home, band }
    }

    /// The binary with an isolated home, so no user config is read.
    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("quillcheck");
        cmd.env("HOME", self.home.path()).env_remove("RUST_LOG");
        cmd
    }

    fn check(&self, args: &[&str]) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("-f").arg(&self.band).args(args);
        cmd
    }
}

#[test]
fn test_passing_assertion_exits_zero() {
    let fixture = Fixture::new();
    fixture
        .check(&["-q", "every", "-p", "members name", "matches", r"^\w+ \w+$"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_failing_assertion_prints_report_and_exits_one() {
    let fixture = Fixture::new();
    fixture
        .check(&["-p", "members name", "has", "Pete"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::starts_with("Selection on path members name --->\n")
                .and(predicate::str::contains("    - Jack Bruce\n"))
                .and(predicate::str::contains("Compared with --->\n    Pete\n"))
                .and(predicate::str::ends_with(
                    "Not verified (expected = 1, got = 0)\n",
                )),
        );
}

#[test]
fn test_default_quantifier_is_one() {
    let fixture = Fixture::new();
    // only "Ginger Baker" contains "Ba"
    fixture
        .check(&["-p", "members name", "has", "Ba"])
        .assert()
        .success();
    // every name contains "a"
    fixture
        .check(&["-p", "members name", "has", "a"])
        .assert()
        .code(1);
    fixture
        .check(&["-q", "some", "-p", "members name", "has", "a"])
        .assert()
        .success();
}

#[test]
fn test_counted_quantifiers_and_prefix() {
    let fixture = Fixture::new();
    // born values are integers, compared by equality
    fixture
        .check(&[
            "--prefix", "members", "-q", "exactly", "-n", "2", "-p", "born", "has", "194",
        ])
        .assert()
        .code(1);
    fixture
        .check(&[
            "--prefix", "members", "-q", "at-most", "-n", "1", "-p", "instrument", "is", "drums",
        ])
        .assert()
        .success();
}

#[test]
fn test_filter_path_syntax() {
    let fixture = Fixture::new();
    fixture
        .check(&["-p", "members [instrument=drums] born", "is", "1939"])
        .assert()
        .success();
    fixture
        .check(&["-p", "members [name='Eric Clapton'] born", "is", "1939"])
        .assert()
        .code(1);
}

#[test]
fn test_missing_attribute_under_every_exits_one() {
    let fixture = Fixture::new();
    fixture
        .check(&["-q", "every", "-p", "members vocals", "is-not-none"])
        .assert()
        .code(1)
        .stderr("Attribute vocals not found in path members vocals\n");
}

#[test]
fn test_several_content_items_are_all_checked() {
    let fixture = Fixture::new();
    fixture
        .check(&["-q", "some", "-p", "members instrument", "has", "bass", "drums"])
        .assert()
        .success();
    fixture
        .check(&["-q", "some", "-p", "members instrument", "has", "bass", "keys"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Compared with --->\n    keys\n"));
}

#[test]
fn test_content_arity_errors_exit_two() {
    let fixture = Fixture::new();
    fixture
        .check(&["-p", "band", "is-none", "extra"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("takes no content arguments"));
    fixture
        .check(&["-p", "band", "has"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("needs at least one content argument"));
    fixture
        .check(&["-p", "members", "has-length", "3", "4"])
        .assert()
        .code(2);
}

#[test]
fn test_usage_errors_exit_two() {
    let fixture = Fixture::new();
    fixture
        .check(&["-p", "members [born", "is-not-none"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid path"));
    fixture
        .check(&["-p", "band", "is-a", "colour"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown kind"));
}

#[test]
fn test_unreadable_file_exits_two() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("-f")
        .arg(fixture.home.path().join("missing.yaml"))
        .arg("is-not-none")
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("Error: Failed to read file"));
}

#[test]
fn test_reads_stdin_when_file_is_dash() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["-f", "-", "-q", "every", "-p", "years", "is-a", "integer"])
        .write_stdin(r#"{"years": [1966, 1967, 1968]}"#)
        .assert()
        .success();
    fixture
        .cmd()
        .args(["-p", "band", "is", "Cream"])
        .write_stdin("band: Cream\n")
        .assert()
        .success();
}

#[test]
fn test_json_report_format() {
    let fixture = Fixture::new();
    fixture
        .check(&["--format", "json", "-p", "band", "is", "Blind Faith"])
        .assert()
        .code(1)
        .stderr(
            "Selection on path band --->\n    \"Cream\"\nCompared with --->\n    \"Blind Faith\"\nNot verified (expected = 1, got = 0)\n",
        );
}

#[test]
fn test_config_file_controls_report() {
    let fixture = Fixture::new();
    let config_dir = fixture.home.path().join(".config").join("quillcheck");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "indent_size = 2\nshow_counts = false\n",
    )
    .unwrap();

    fixture
        .check(&["-p", "band", "is", "Blind Faith"])
        .assert()
        .code(1)
        .stderr("Selection on path band --->\n  Cream\nCompared with --->\n  Blind Faith\nNot verified\n");
}
