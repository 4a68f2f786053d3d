use assert_cmd::Command;
use predicates::prelude::*;

fn ledger_status() -> Command {
    Command::cargo_bin("ledger-status").unwrap()
}

// --- --help / --version ---

#[test]
fn help_lists_subcommands() {
    ledger_status()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("response"))
        .stdout(predicate::str::contains("compose"))
        .stdout(predicate::str::contains("legacy"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn version_output_contains_binary_name() {
    ledger_status()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ledger-status"));
}

// --- decode ---

#[test]
fn decode_registry_code() {
    ledger_status()
        .args(["decode", "0x5505"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0x5505: SEC_PIN_05"))
        .stdout(predicate::str::contains("security/pin"));
}

#[test]
fn decode_success() {
    ledger_status()
        .args(["decode", "0x9000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0x9000: success"));
}

#[test]
fn decode_legacy_code() {
    ledger_status()
        .args(["decode", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy exception_io_reset"))
        .stdout(predicate::str::contains("IOL_RST_01 (0x1401)"));
}

#[test]
fn decode_unknown_word() {
    ledger_status()
        .args(["decode", "0x7001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown (misc/unknown)"));
}

#[test]
fn decode_unallocated_code() {
    ledger_status()
        .args(["decode", "0x5402"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0x5402: SEC_KEY_02"))
        .stdout(predicate::str::contains("unallocated"));
}

#[test]
fn decode_allocated_code_is_not_flagged() {
    ledger_status()
        .args(["decode", "0x5505"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unallocated").not());
}

#[test]
fn decode_json() {
    ledger_status()
        .args(["decode", "0x6e01", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mnemonic\": \"APD_CLA_01\""))
        .stdout(predicate::str::contains("\"subcategory\": \"class\""));
}

#[test]
fn decode_rejects_invalid_word() {
    ledger_status()
        .args(["decode", "0xzz"])
        .assert()
        .failure();
}

// --- response ---

#[test]
fn response_splits_payload() {
    ledger_status()
        .args(["response", "01029000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("payload: 0102"))
        .stdout(predicate::str::contains("status: 0x9000: success"));
}

#[test]
fn response_too_short() {
    ledger_status()
        .args(["response", "90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid buffer length"));
}

// --- compose ---

#[test]
fn compose_security_pin() {
    ledger_status()
        .args(["compose", "security/pin", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0x5505: SEC_PIN_05"));
}

#[test]
fn compose_apdu_class() {
    ledger_status()
        .args(["compose", "apdu/class", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0x6e01: APD_CLA_01"));
}

#[test]
fn compose_application_code() {
    ledger_status()
        .args(["compose", "app01/3", "0x2b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0xb32b: APP1_3_2B"));
}

#[test]
fn compose_identifier_out_of_range() {
    ledger_status()
        .args(["compose", "security/pin", "0x2c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside of the allowed range"));
}

#[test]
fn compose_unknown_category() {
    ledger_status()
        .args(["compose", "security/nope", "1"])
        .assert()
        .failure();
}

// --- legacy ---

#[test]
fn legacy_reset_maps_to_io_reset() {
    ledger_status()
        .args(["legacy", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IOL_RST_01 (0x1401)"));
}

#[test]
fn legacy_out_of_domain_unmapped() {
    ledger_status()
        .args(["legacy", "0x20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unmapped"));
}

// --- list / check ---

#[test]
fn list_all_codes() {
    ledger_status()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0x1101 IOL_OFW_01 io/overflow"))
        .stdout(predicate::str::contains("0x6e01 APD_CLA_01 apdu/class"));
}

#[test]
fn list_filters_by_range() {
    ledger_status()
        .args(["list", "--range", "apdu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("APD_CLA_01"))
        .stdout(predicate::str::contains("SEC_PIN_05").not());
}

#[test]
fn check_registry() {
    ledger_status()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("registry ok"));
}
