use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  cfipcheck Binary Tests
-------------------------------------------------------------------------------------------------*/

const TEST_RANGES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/ip-ranges.json");

/// The binary, reading the fixture document and ignoring any configuration in the environment.
fn cfipcheck() -> Command {
    let mut command = Command::cargo_bin("cfipcheck").unwrap();
    command
        .env_remove("CFIPCHECK_SERVICE")
        .env_remove("CFIPCHECK_PROXY")
        .env_remove("CFIPCHECK_PROXY_HOST_PATTERN")
        .arg("--file")
        .arg(TEST_RANGES);
    command
}

/*--------------------------------------------------------------------------------------
  Version
--------------------------------------------------------------------------------------*/

#[test]
fn command_version() {
    Command::cargo_bin("cfipcheck")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

/*--------------------------------------------------------------------------------------
  Addresses From Arguments
--------------------------------------------------------------------------------------*/

#[test]
fn command_argument_addresses() {
    cfipcheck()
        .args(["54.182.204.72", "5.175.193.164", "999.1.1.1"])
        .assert()
        .success()
        .stdout(
            "OK - CloudFront IP: 54.182.204.72\n\
             Bad - not CloudFront IP: 5.175.193.164\n\
             Error - not a valid IPv4 address - got: 999.1.1.1\n",
        );
}

#[test]
fn command_arguments_take_precedence_over_stdin() {
    cfipcheck()
        .arg("54.182.204.72")
        .write_stdin("5.175.193.164\n1.2.3.4\n")
        .assert()
        .success()
        .stdout("OK - CloudFront IP: 54.182.204.72\n");
}

#[test]
fn command_skips_empty_arguments() {
    cfipcheck()
        .args(["", "204.246.175.9", ""])
        .assert()
        .success()
        .stdout("OK - CloudFront IP: 204.246.175.9\n");
}

#[test]
fn command_reports_hyphenated_arguments_as_invalid() {
    cfipcheck()
        .args(["54.182.204.72", "-1.2.3.4", "5.175.193.164"])
        .assert()
        .success()
        .stdout(
            "OK - CloudFront IP: 54.182.204.72\n\
             Error - not a valid IPv4 address - got: -1.2.3.4\n\
             Bad - not CloudFront IP: 5.175.193.164\n",
        );
}

#[test]
fn command_reports_leading_hyphenated_argument_as_invalid() {
    cfipcheck()
        .args(["-1.2.3.4", "54.182.204.72"])
        .assert()
        .success()
        .stdout(
            "Error - not a valid IPv4 address - got: -1.2.3.4\n\
             OK - CloudFront IP: 54.182.204.72\n",
        );
}

/*--------------------------------------------------------------------------------------
  Addresses From Standard Input
--------------------------------------------------------------------------------------*/

#[test]
fn command_stdin_addresses() {
    cfipcheck()
        .write_stdin("1.2.3.4,5.6.7.8  9.10.11.12\n\n52.85.1.1\tnot-an-ip\n")
        .assert()
        .success()
        .stdout(
            "Bad - not CloudFront IP: 1.2.3.4\n\
             Bad - not CloudFront IP: 5.6.7.8\n\
             Bad - not CloudFront IP: 9.10.11.12\n\
             OK - CloudFront IP: 52.85.1.1\n\
             Error - not a valid IPv4 address - got: not-an-ip\n",
        );
}

#[test]
fn command_empty_stdin() {
    cfipcheck().write_stdin("").assert().success().stdout("");
}

/*--------------------------------------------------------------------------------------
  Service Filter
--------------------------------------------------------------------------------------*/

#[test]
fn command_service() {
    cfipcheck()
        .args(["--service", "ROUTE53_HEALTHCHECKS", "15.177.1.1", "54.182.204.72"])
        .assert()
        .success()
        .stdout(
            "OK - CloudFront IP: 15.177.1.1\n\
             Bad - not CloudFront IP: 54.182.204.72\n",
        );
}

#[test]
fn command_unknown_service_reports_everything_unmatched() {
    cfipcheck()
        .args(["--service", "NO_SUCH_SERVICE", "54.182.204.72"])
        .assert()
        .success()
        .stdout("Bad - not CloudFront IP: 54.182.204.72\n");
}

/*--------------------------------------------------------------------------------------
  Show Ranges
--------------------------------------------------------------------------------------*/

#[test]
fn command_show_ranges() {
    cfipcheck()
        .arg("--show-ranges")
        .assert()
        .success()
        .stdout("52.84.0.0/15\n54.182.0.0/16\n54.239.128.0/18\n204.246.174.0/23\n");
}

/*--------------------------------------------------------------------------------------
  Summary and CSV Output
--------------------------------------------------------------------------------------*/

#[test]
fn command_summary() {
    let output = cfipcheck()
        .args(["--summary", "54.182.204.72", "5.175.193.164"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("OK - CloudFront IP: 54.182.204.72\n"));
    assert!(stdout.contains("Total"));
}

#[test]
fn command_csv() {
    let csv_file: PathBuf = [env!("CARGO_TARGET_TMPDIR"), "command_csv.csv"]
        .iter()
        .collect();

    cfipcheck()
        .arg("--csv")
        .arg(&csv_file)
        .args(["54.182.204.72", "5.175.193.164", "bogus"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&csv_file).unwrap(),
        "address,result\n\
         54.182.204.72,matched\n\
         5.175.193.164,unmatched\n\
         bogus,invalid\n"
    );
}

/*--------------------------------------------------------------------------------------
  Unavailable IP Ranges
--------------------------------------------------------------------------------------*/

#[test]
fn command_missing_file_fails() {
    let output = Command::cargo_bin("cfipcheck")
        .unwrap()
        .args(["--file", "./tests/data/does-not-exist.json", "54.182.204.72"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("can't get allowed CIDR list from ./tests/data/does-not-exist.json"));
}

#[test]
fn command_unreachable_url_fails() {
    let output = Command::cargo_bin("cfipcheck")
        .unwrap()
        .env_remove("CFIPCHECK_PROXY")
        .args(["--url", "http://127.0.0.1:9/ip-ranges.json", "54.182.204.72"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("can't get allowed CIDR list from http://127.0.0.1:9/ip-ranges.json"));
}
