//! Fatal error specs for facility identifier assignment

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn held_lock_dumps_summary_and_leaves_table_untouched() {
    let temp = Project::empty();
    temp.indexed_table("done/hydrant", &["ABC"]);
    temp.indexed_table("gdb/casing", &["ABC", "ABC"]);
    temp.file("gdb/.edit.lock", "");

    let output = temp
        .colawater()
        .args(["fids", "--placeholder", "ABC"])
        .args(["--input", "done/hydrant,hydrant,1"])
        .args(["--input", "gdb/casing,casing,1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "[RESULT] [TOOL] New start values:\n\thydrant: 3\n[OUTPUT DUMPED DUE TO ERROR] \n"
    );
    let err = stderr(&output);
    assert!(err.contains("error: cannot acquire a lock on"), "stderr:\n{}", err);
    assert!(err.contains("suggestions:"), "stderr:\n{}", err);
    // The earlier table was committed separately
    assert_eq!(temp.column("done/hydrant", FACILITYID), vec![json!("1HYD")]);
    assert_eq!(
        temp.column("gdb/casing", FACILITYID),
        vec![json!("ABC"), json!("ABC")]
    );
}

#[test]
fn missing_index_field_is_fatal_before_any_write() {
    let temp = Project::empty();
    temp.table(
        "gdb/hydrant",
        &[OBJECTID, FACILITYID],
        vec![vec![json!(1), json!("ABC")]],
    );

    let output = temp
        .colawater()
        .args(["fids", "--placeholder", "ABC"])
        .args(["--input", "gdb/hydrant,hydrant,1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("field 'FACILITYIDINDEX' not found"));
    assert_eq!(temp.column("gdb/hydrant", FACILITYID), vec![json!("ABC")]);
}

#[test]
fn missing_table_is_fatal() {
    let temp = Project::empty();

    let output = temp
        .colawater()
        .args(["fids", "--placeholder", "ABC"])
        .args(["--input", "gdb/hydrant,hydrant,1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("table not found: gdb/hydrant"));
    assert!(stdout(&output).ends_with("[OUTPUT DUMPED DUE TO ERROR] \n"));
}

#[test]
fn missing_facility_id_field_stops_the_batch() {
    let temp = Project::empty();
    temp.table(
        "gdb/service_line",
        &[OBJECTID, "NAME"],
        vec![vec![json!(1), json!("ABC")]],
    );
    temp.indexed_table("gdb/casing", &["ABC"]);

    let output = temp
        .colawater()
        .args(["fids", "--placeholder", "ABC"])
        .args(["--input", "gdb/service_line,service_line,1"])
        .args(["--input", "gdb/casing,casing,20"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("field 'FACILITYID' not found"));
    assert_eq!(temp.column("gdb/casing", FACILITYID), vec![json!("ABC")]);
}
