//! Facility identifier assignment specs

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn assigns_in_cursor_order_and_reports_next_start() {
    let temp = Project::empty();
    temp.indexed_table("gdb/hydrant", &["ABC", "12HYD", "ABC", "ABC"]);

    let output = temp
        .colawater()
        .args(["fids", "--placeholder", "ABC", "--interval", "2"])
        .args(["--input", "gdb/hydrant,Hydrant,200"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "[RESULT] [TOOL] New start values:\n\thydrant: 206\n"
    );
    assert_eq!(
        temp.column("gdb/hydrant", FACILITYID),
        vec![json!("200HYD"), json!("12HYD"), json!("202HYD"), json!("204HYD")]
    );
    assert_eq!(
        temp.column("gdb/hydrant", FACILITYIDINDEX),
        vec![json!(200), Value::Null, json!(202), json!(204)]
    );
    assert!(!temp.path().join("gdb/.edit.lock").exists());
}

#[test]
fn water_mains_use_the_prefixed_template() {
    let temp = Project::empty();
    temp.indexed_table("gdb/water_main", &["ABC"]);

    let output = temp
        .colawater()
        .args(["fids", "--placeholder", "ABC"])
        .args(["--input", "gdb/water_main,water main,7"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        temp.column("gdb/water_main", FACILITYID),
        vec![json!("000015-WATER-0007")]
    );
}

#[test]
fn non_index_types_leave_no_index() {
    let temp = Project::empty();
    temp.table(
        "gdb/service_line",
        &[OBJECTID, FACILITYID],
        vec![vec![json!(1), json!("ABC")]],
    );

    let output = temp
        .colawater()
        .args(["fids", "--placeholder", "ABC"])
        .args(["--input", "gdb/service_line,service_line,40"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(temp.column("gdb/service_line", FACILITYID), vec![json!("40SERV")]);
    assert_eq!(temp.column("gdb/service_line", FACILITYIDINDEX), vec![Value::Null]);
}

#[test]
fn batch_reports_every_table() {
    let temp = Project::empty();
    temp.indexed_table("gdb/hydrant", &["ABC"]);
    temp.indexed_table("gdb/casing", &["12CA"]);
    temp.indexed_table("gdb/fitting", &["ABC"]);

    let output = temp
        .colawater()
        .args(["fids", "--placeholder", "ABC", "--interval", "1"])
        .args(["--input", "gdb/hydrant,hydrant,5"])
        .args(["--input", "gdb/casing,casing,5"])
        .args(["--input", "gdb/fitting,fitting,-"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "[RESULT] [TOOL] New start values:\n\thydrant: 6\n\tcasing: None used\n"
    );
    let err = stderr(&output);
    assert!(err.contains("warning: No rows matched placeholder 'ABC': [casing]"));
    assert!(err.contains("warning: Start value omitted: skipping [fitting]"));
    assert_eq!(temp.column("gdb/fitting", FACILITYID), vec![json!("ABC")]);
}
