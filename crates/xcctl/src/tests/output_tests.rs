//! Tests for output format parsing and the renderers.

use std::str::FromStr;

use insta::assert_snapshot;
use rstest::rstest;
use xcctl_document::Value;

use super::support::SERVICE_LIST;
use crate::output::{OutputFormat, OutputFormatError, RenderOptions, render};

fn doc(text: &str) -> Value {
    Value::parse_text(text).expect("document should decode")
}

fn rendered(spec: &str, document: &Value, options: RenderOptions) -> String {
    let format = OutputFormat::from_str(spec).expect("format should parse");
    let mut out = Vec::new();
    render(&format, document, options, &mut out).expect("render should succeed");
    String::from_utf8(out).expect("output utf8")
}

fn plain(spec: &str, document: &Value) -> String {
    rendered(spec, document, RenderOptions::default())
}

#[rstest]
#[case::table("table", OutputFormat::Table)]
#[case::upper_case("WIDE", OutputFormat::Wide)]
#[case::padded(" name ", OutputFormat::Name)]
#[case::json("json", OutputFormat::Json)]
#[case::yaml("Yaml", OutputFormat::Yaml)]
fn parses_built_in_formats(#[case] spec: &str, #[case] expected: OutputFormat) {
    assert_eq!(OutputFormat::from_str(spec), Ok(expected));
}

#[rstest]
#[case::unknown("xml", Some(OutputFormatError::Unknown { name: String::from("xml") }))]
#[case::empty_jsonpath("jsonpath=", Some(OutputFormatError::EmptyJsonPath))]
#[case::quoted_empty_jsonpath("jsonpath=''", Some(OutputFormatError::EmptyJsonPath))]
#[case::empty_columns("custom-columns=", Some(OutputFormatError::EmptyColumns))]
#[case::empty_template("template=", Some(OutputFormatError::EmptyTemplate))]
fn rejects_incomplete_formats(#[case] spec: &str, #[case] expected: Option<OutputFormatError>) {
    assert_eq!(OutputFormat::from_str(spec).err(), expected);
}

#[test]
fn unknown_format_errors_name_the_format() {
    let error = OutputFormat::from_str("xml").expect_err("xml is not a format");
    assert!(error.to_string().starts_with("unknown output format: xml"));
}

#[test]
fn columns_without_header_or_path_are_skipped() {
    let error = OutputFormat::from_str("custom-columns=:x,NAME:,nocolon")
        .expect_err("no column is valid");
    assert_eq!(
        error,
        OutputFormatError::NoColumns {
            spec: String::from(":x,NAME:,nocolon")
        }
    );
}

#[test]
fn unterminated_placeholders_are_rejected() {
    let error = OutputFormat::from_str("template=name: {{ .metadata.name")
        .expect_err("placeholder is open");
    assert_eq!(
        error,
        OutputFormatError::UnterminatedPlaceholder { offset: 6 }
    );
}

#[test]
fn format_prefixes_ignore_case() {
    assert!(matches!(
        OutputFormat::from_str("JSONPath={.metadata.name}"),
        Ok(OutputFormat::JsonPath(_))
    ));
    assert!(matches!(
        OutputFormat::from_str("Custom-Columns=NAME:.metadata.name"),
        Ok(OutputFormat::CustomColumns(_))
    ));
}

#[test]
fn table_lists_names() {
    assert_snapshot!(plain("table", &doc(SERVICE_LIST)).trim_end(), @r"
    NAME
    web
    db
    cache
    ");
}

#[test]
fn table_shows_labels_on_request() {
    let output = rendered(
        "table",
        &doc(SERVICE_LIST),
        RenderOptions { show_labels: true },
    );
    assert_snapshot!(output.trim_end(), @r"
    NAME   LABELS
    web    env=prod,tier=frontend
    db     env=dev
    cache
    ");
}

#[test]
fn wide_table_fills_missing_columns() {
    assert_snapshot!(plain("wide", &doc(SERVICE_LIST)).trim_end(), @r"
    NAME   NAMESPACE  UID     CREATED
    web    shop       u-1     2024-03-01T10:20:30Z
    db     default    <none>  <unknown>
    cache  shop       <none>  <unknown>
    ");
}

#[rstest]
#[case::offset("2024-03-01T12:20:30+02:00", "2024-03-01T10:20:30Z")]
#[case::unparsable("yesterday", "yesterday")]
fn wide_table_normalises_timestamps(#[case] raw: &str, #[case] expected: &str) {
    let item = doc(&format!(
        r#"{{"name": "web", "system_metadata": {{"creation_timestamp": "{raw}"}}}}"#
    ));
    let output = plain("wide", &item);
    let row = output.lines().nth(1).expect("one data row");
    assert!(row.ends_with(expected), "row: {row}");
}

#[test]
fn name_output_falls_back_to_top_level_names() {
    let list = doc(r#"{"items": [{"name": "bare"}, {"spec": {}}, "scalar"]}"#);
    assert_eq!(plain("name", &list), "bare\n<unknown>\n");
}

#[test]
fn single_documents_render_as_one_row() {
    let single = doc(r#"{"metadata": {"name": "web"}}"#);
    assert_eq!(plain("name", &single), "web\n");
}

#[test]
fn jsonpath_prints_one_line_per_element() {
    let output = plain("jsonpath='{.items[*].metadata.name}'", &doc(SERVICE_LIST));
    assert_eq!(output, "web\ndb\ncache\n");
}

#[rstest]
#[case::scalar("jsonpath={.items[0].spec.port}", "80\n")]
#[case::object("jsonpath=.items[1].metadata.labels", "map[env:dev]\n")]
#[case::missing("jsonpath={.items[0].status}", "")]
fn jsonpath_renders_values(#[case] spec: &str, #[case] expected: &str) {
    assert_eq!(plain(spec, &doc(SERVICE_LIST)), expected);
}

#[test]
fn custom_columns_align_by_display_width() {
    let list = doc(
        r#"{"items": [
            {"metadata": {"name": "café"}, "spec": {"port": 80}},
            {"metadata": {"name": "database"}}
        ]}"#,
    );
    let output = plain("custom-columns=NAME:.metadata.name,PORT:.spec.port", &list);
    assert_snapshot!(output.trim_end(), @r"
    NAME      PORT
    café      80
    database
    ");
}

#[test]
fn templates_substitute_placeholders() {
    let single = doc(r#"{"metadata": {"name": "web"}, "spec": {"port": 80}}"#);
    assert_eq!(
        plain("template={{.metadata.name}} listens on {{ .spec.port }}", &single),
        "web listens on 80\n"
    );
}

#[test]
fn json_output_is_pretty_and_sorted() {
    let single = doc(r#"{"b": 1, "a": {"c": null}}"#);
    assert_eq!(
        plain("json", &single),
        "{\n  \"a\": {\n    \"c\": null\n  },\n  \"b\": 1\n}\n"
    );
}

#[test]
fn yaml_output_round_trips() {
    let single = doc(r#"{"metadata": {"name": "web"}, "ports": [80, 443]}"#);
    let output = plain("yaml", &single);
    assert!(output.ends_with('\n'));
    assert_eq!(doc(&output), single);
}
