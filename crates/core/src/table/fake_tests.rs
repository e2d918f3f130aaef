// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::table::{FACILITYID, OBJECTID};

fn store() -> FakeTableStore {
    FakeTableStore::new().with_table(
        "gdb/casing",
        &[OBJECTID, FACILITYID],
        vec![
            vec![Value::Int(1), "ABC".into()],
            vec![Value::Int(2), "4CA".into()],
        ],
    )
}

#[test]
fn describe_splits_workspace_and_name() {
    let info = store().describe("gdb/casing").unwrap();
    assert_eq!(info.name, "casing");
    assert_eq!(info.workspace, "gdb");
    assert!(info.has_field(FACILITYID));
    assert!(!info.has_field("FACILITYIDINDEX"));
}

#[test]
fn describe_unknown_table() {
    let err = store().describe("gdb/nope").unwrap_err();
    assert_eq!(err, TableError::TableNotFound("gdb/nope".to_string()));
}

#[test]
fn committed_session_applies_writes() {
    let store = store();
    let mut edit = store.start_editing("gdb").unwrap();
    edit.update_row("gdb/casing", 1, &[(FACILITYID, "6CA".into())])
        .unwrap();
    edit.commit().unwrap();

    assert_eq!(
        store.column("gdb/casing", FACILITYID),
        vec![Value::from("6CA"), Value::from("4CA")]
    );
    assert!(store.calls().contains(&TableCall::Commit {
        workspace: "gdb".to_string()
    }));
}

#[test]
fn dropped_session_discards_writes() {
    let store = store();
    {
        let mut edit = store.start_editing("gdb").unwrap();
        edit.update_row("gdb/casing", 1, &[(FACILITYID, "6CA".into())])
            .unwrap();
    }

    assert_eq!(store.column("gdb/casing", FACILITYID)[0], Value::from("ABC"));
    assert!(store.calls().contains(&TableCall::Abort {
        workspace: "gdb".to_string()
    }));
}

#[test]
fn second_session_on_same_workspace_is_locked_out() {
    let store = store();
    let _first = store.start_editing("gdb").unwrap();
    let second = store.start_editing("gdb");
    assert!(matches!(second, Err(TableError::LockUnavailable(_))));
}

#[test]
fn lock_is_released_after_session_ends() {
    let store = store();
    drop(store.start_editing("gdb").unwrap());
    assert!(store.start_editing("gdb").is_ok());
}

#[test]
fn fail_locking_rejects_sessions() {
    let store = store();
    store.fail_locking();
    assert!(matches!(
        store.start_editing("gdb"),
        Err(TableError::LockUnavailable(_))
    ));
}

#[test]
fn fail_updates_after_limit() {
    let store = store();
    store.fail_updates_after(1);
    let mut edit = store.start_editing("gdb").unwrap();
    edit.update_row("gdb/casing", 1, &[(FACILITYID, "6CA".into())])
        .unwrap();
    let err = edit
        .update_row("gdb/casing", 2, &[(FACILITYID, "8CA".into())])
        .unwrap_err();
    assert!(matches!(err, TableError::LockUnavailable(_)));
}

#[test]
fn editing_outside_session_workspace_is_rejected() {
    let store = store().with_table("other/hydrant", &[OBJECTID, FACILITYID], vec![]);
    let mut edit = store.start_editing("gdb").unwrap();
    let err = edit
        .select_for_update("other/hydrant", &Filter::All)
        .unwrap_err();
    assert_eq!(err, TableError::NotEditable("other/hydrant".to_string()));
}

#[test]
fn update_of_missing_field_fails_before_commit() {
    let store = store();
    let mut edit = store.start_editing("gdb").unwrap();
    let err = edit
        .update_row("gdb/casing", 1, &[("FACILITYIDINDEX", Value::Int(6))])
        .unwrap_err();
    assert!(matches!(err, TableError::FieldNotFound { .. }));
}
