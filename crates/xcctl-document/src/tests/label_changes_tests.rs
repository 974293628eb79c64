//! Tests for label and annotation change arguments.

use rstest::rstest;

use super::{doc, object};
use crate::{LabelChange, LabelChangeError, LabelChanges, MetadataField, Value, merge};

#[test]
fn parses_sets_and_removals_in_order() {
    let changes = LabelChanges::parse(["env=prod", "owner-", "note=a=b"]).expect("valid");
    assert_eq!(
        changes.changes(),
        [
            LabelChange::Set {
                key: String::from("env"),
                value: String::from("prod"),
            },
            LabelChange::Remove {
                key: String::from("owner"),
            },
            LabelChange::Set {
                key: String::from("note"),
                value: String::from("a=b"),
            },
        ]
    );
    assert_eq!(
        changes.changes().iter().map(LabelChange::key).collect::<Vec<_>>(),
        ["env", "owner", "note"]
    );
}

#[test]
fn empty_values_are_allowed() {
    let changes = LabelChanges::parse(["env="]).expect("valid");
    assert_eq!(
        changes.changes(),
        [LabelChange::Set {
            key: String::from("env"),
            value: String::new(),
        }]
    );
}

#[test]
fn equals_sign_wins_over_a_trailing_dash() {
    let changes = LabelChanges::parse(["range=1-"]).expect("valid");
    assert_eq!(
        changes.changes(),
        [LabelChange::Set {
            key: String::from("range"),
            value: String::from("1-"),
        }]
    );
}

#[rstest]
#[case::bare_key("env")]
#[case::empty_key("=prod")]
#[case::bare_dash("-")]
#[case::empty("")]
fn malformed_arguments_are_rejected(#[case] argument: &str) {
    let error = LabelChanges::parse(["ok=1", argument]).expect_err("should be rejected");
    assert_eq!(
        error,
        LabelChangeError {
            argument: argument.to_owned(),
        }
    );
}

#[test]
fn no_arguments_yield_an_empty_change_set() {
    let changes = LabelChanges::parse(Vec::<String>::new()).expect("valid");
    assert!(changes.is_empty());
}

#[test]
fn merge_patch_uses_tombstones_for_removals() {
    let changes = LabelChanges::parse(["env=prod", "owner-"]).expect("valid");
    assert_eq!(
        Value::Object(changes.to_merge_patch(MetadataField::Labels)),
        doc(r#"{"metadata": {"labels": {"env": "prod", "owner": null}}}"#)
    );
}

#[test]
fn later_changes_to_a_key_win() {
    let changes = LabelChanges::parse(["env=prod", "env-"]).expect("valid");
    assert_eq!(
        Value::Object(changes.to_merge_patch(MetadataField::Labels)),
        doc(r#"{"metadata": {"labels": {"env": null}}}"#)
    );
}

#[test]
fn merge_patch_updates_only_the_named_labels() {
    let document = object(
        r#"{"metadata": {"name": "web", "labels": {"env": "dev", "owner": "ops", "tier": "web"}}}"#,
    );
    let changes = LabelChanges::parse(["env=prod", "owner-"]).expect("valid");
    assert_eq!(
        merge(&document, &changes.to_merge_patch(MetadataField::Labels)),
        object(r#"{"metadata": {"name": "web", "labels": {"env": "prod", "tier": "web"}}}"#)
    );
}

#[test]
fn annotation_patches_target_the_annotations_map() {
    let document = object(
        r#"{"metadata": {"labels": {"env": "dev"}, "annotations": {"note": "old", "drop": "x"}}}"#,
    );
    let changes = LabelChanges::parse(["note=new", "drop-"]).expect("valid");
    assert_eq!(
        merge(&document, &changes.to_merge_patch(MetadataField::Annotations)),
        object(r#"{"metadata": {"labels": {"env": "dev"}, "annotations": {"note": "new"}}}"#)
    );
}

#[rstest]
#[case::labels(MetadataField::Labels, &["env"])]
#[case::annotations(MetadataField::Annotations, &["note"])]
fn assigned_existing_reports_keys_already_present(
    #[case] field: MetadataField,
    #[case] expected: &[&str],
) {
    let document = object(
        r#"{"metadata": {"labels": {"env": "dev"}, "annotations": {"note": "old"}}}"#,
    );
    let changes = LabelChanges::parse(["env=prod", "note=new", "fresh=1", "gone-"]).expect("valid");
    assert_eq!(
        changes.assigned_existing(field.current(&document)),
        expected
    );
}

#[test]
fn removals_never_count_as_existing_assignments() {
    let document = object(r#"{"metadata": {"annotations": {"note": "old"}}}"#);
    let changes = LabelChanges::parse(["note-"]).expect("valid");
    assert!(
        changes
            .assigned_existing(MetadataField::Annotations.current(&document))
            .is_empty()
    );
}

#[test]
fn missing_metadata_map_has_no_current_entries() {
    let document = object(r#"{"metadata": {"name": "web"}}"#);
    assert_eq!(MetadataField::Annotations.current(&document), None);
}
