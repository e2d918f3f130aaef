//! Config file specs

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn placeholder_and_interval_come_from_config() {
    let temp = Project::empty();
    temp.indexed_table("gdb/hydrant", &["XYZ", "XYZ"]);
    temp.file("colawater.toml", "placeholder = \"XYZ\"\ninterval = 5\n");

    let output = temp
        .colawater()
        .args(["fids", "--input", "gdb/hydrant,hydrant,10"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        temp.column("gdb/hydrant", FACILITYID),
        vec![json!("10HYD"), json!("15HYD")]
    );
}

#[test]
fn placeholder_defaults_to_login_initials() {
    let temp = Project::empty();
    temp.indexed_table("gdb/hydrant", &["TES", "ABC"]);

    let output = temp
        .colawater()
        .args(["fids", "--input", "gdb/hydrant,hydrant,10"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        temp.column("gdb/hydrant", FACILITYID),
        vec![json!("10HYD"), json!("ABC")]
    );
}

#[test]
fn explicit_config_path_resolves_layers_relative_to_it() {
    let temp = Project::empty();
    temp.indexed_table("data/gdb/hydrant", &["12HYD", "bad"]);
    temp.file(
        "data/settings.toml",
        "[layers]\nhydrant = \"gdb/hydrant\"\n",
    );

    let output = temp
        .colawater()
        .args(["--config", "data/settings.toml", "qc", "--format"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert!(stdout(&output).contains("\t2, bad\n"));
}

#[test]
fn invalid_config_fails_before_running() {
    let temp = Project::empty();
    temp.file("colawater.toml", "interval = 0\n");

    let output = temp
        .colawater()
        .args(["qc", "--all"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("interval must be greater than zero"));
    assert!(stdout(&output).is_empty());
}
