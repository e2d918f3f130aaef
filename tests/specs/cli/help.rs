//! Help and usage specs

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();
    let output = temp.colawater().arg("--help").output().unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("fids"), "stdout:\n{}", out);
    assert!(out.contains("qc"), "stdout:\n{}", out);
}

#[test]
fn missing_command_is_a_usage_error() {
    let temp = Project::empty();
    let output = temp.colawater().output().unwrap();

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn fids_requires_an_input() {
    let temp = Project::empty();
    let output = temp.colawater().args(["fids", "--placeholder", "ABC"]).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--input"));
}

#[test]
fn zero_interval_is_rejected() {
    let temp = Project::empty();
    temp.indexed_table("gdb/hydrant", &["ABC"]);

    let output = temp
        .colawater()
        .args(["fids", "--interval", "0", "--input", "gdb/hydrant,hydrant,1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(temp.column("gdb/hydrant", FACILITYID), vec![json!("ABC")]);
}

#[test]
fn unknown_asset_type_is_rejected() {
    let temp = Project::empty();
    let output = temp
        .colawater()
        .args(["fids", "--input", "gdb/pumps,pump,1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unknown asset type: pump"));
}
