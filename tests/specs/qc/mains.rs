//! Quality control specs for water mains

use crate::prelude::*;

const MAIN_FIELDS: &[&str] = &[
    OBJECTID,
    FACILITYID,
    FACILITYIDINDEX,
    "INTEGRATIONSTATUS",
    "COMMENTS",
    "DATASOURCE",
];

fn main_row(oid: i64, status: &str, comments: Value, datasource: Value) -> Vec<Value> {
    vec![
        json!(oid),
        json!(format!("000015-WATER-000{}", oid)),
        json!(oid),
        json!(status),
        comments,
        datasource,
    ]
}

fn mains(temp: &Project) {
    temp.table(
        "gdb/water_main",
        MAIN_FIELDS,
        vec![
            main_row(1, "Y", json!("100.tif"), json!("SURVEY")),
            main_row(2, "Y", json!("missing.pdf"), json!("UNK")),
            main_row(3, "N", Value::Null, Value::Null),
            main_row(4, "Y", Value::Null, json!("")),
        ],
    );
    temp.file("scans/100.tif", "");
}

#[test]
fn water_main_checks_report_integrated_mains_only() {
    let temp = Project::empty();
    mains(&temp);

    let output = temp
        .colawater()
        .args(["qc", "--wm-files", "--wm-datasources"])
        .args(["--layer", "water_main=gdb/water_main", "--scan-dir", "scans"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let out = stdout(&output);
    assert!(
        out.contains("[water_main] Non-existent associated files (object ID, comments):\n"),
        "stdout:\n{}",
        out
    );
    assert!(out.contains("\t2, missing.pdf\n\t4, <Null>\n"), "stdout:\n{}", out);
    assert!(out.contains("2 non-existent files for integrated mains (2 unique)."));
    assert!(out.contains("\t2, UNK\n\t4, \n"), "stdout:\n{}", out);
    assert!(out.contains("2 missing or unknown data sources for integrated mains."));
    assert!(!out.contains("\t3, "));
}

#[test]
fn water_main_checks_are_skipped_without_the_layer() {
    let temp = Project::empty();

    let output = temp
        .colawater()
        .args(["qc", "--wm-files", "--wm-datasources"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert!(stderr(&output)
        .contains("warning: Layer omitted: Water Main, skipping water main checks."));
}

#[test]
fn all_checks_use_configured_layers() {
    let temp = Project::empty();
    mains(&temp);
    temp.file(
        "colawater.toml",
        "scan_dir = \"scans\"\n\n[layers]\nwater_main = \"gdb/water_main\"\n",
    );

    let output = temp.colawater().args(["qc", "--all"]).output().unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("[RESULT] [water_main] 0 incorrectly formatted facility identifiers."));
    assert!(out.contains("[RESULT] [water_main] 0 duplicate groups."));
    assert!(out.contains("2 non-existent files"));
    assert!(out.contains("2 missing or unknown data sources"));
}
