//! Quality control specs for facility identifiers

use crate::prelude::*;
use crate::prelude::assert_eq;

const CSV_NOTE: &str = "Commas, leading and trailing whitespace, and quotation marks have been removed so this output can be consumed properly as a CSV.";

#[test]
fn format_check_lists_malformed_identifiers() {
    let temp = Project::empty();
    temp.indexed_table("gdb/hydrant", &["12HYD", "12 HYD", "12HY\"D\""]);

    let output = temp
        .colawater()
        .args(["qc", "--format", "--layer", "hydrant=gdb/hydrant"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!(
            "[hydrant] Incorrectly formatted facility identifiers (object ID, facility identifier):\n\
             [NOTE] [hydrant] {}\n\
             \t2, 12 HYD\n\
             \t3, 12HYD\n\
             [RESULT] [hydrant] 2 incorrectly formatted facility identifiers.\n",
            CSV_NOTE
        )
    );
    let err = stderr(&output);
    assert!(err.contains("warning: Layer omitted: Casing"));
    assert!(err.contains("warning: Layer omitted: Water Main"));
    assert!(!err.contains("Layer omitted: Hydrant"));
}

#[test]
fn duplicate_check_groups_identifiers() {
    let temp = Project::empty();
    temp.indexed_table("gdb/casing", &["1CA", "2CA", "1CA", "1CA"]);

    let output = temp
        .colawater()
        .args(["qc", "--duplicates", "--layer", "casing=gdb/casing"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("\t1CA, 1, 3, 4\n"), "stdout:\n{}", out);
    assert!(out.ends_with("[RESULT] [casing] 1 duplicate groups.\n"), "stdout:\n{}", out);
}

#[test]
fn no_checks_selected_is_an_error() {
    let temp = Project::empty();

    let output = temp.colawater().arg("qc").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no checks selected"));
}
