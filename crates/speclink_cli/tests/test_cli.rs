//! CLI integration tests

use predicates::prelude::*;
use speclink_test_helpers::prelude::*;

const FORMAT_FIXTURE: &str = r#"[
    {
        "description": "validation of date-time strings",
        "specification": [
            {"core": "7.3.1"},
            {"rfc3339": "5.6", "quote": "date-time = full-date \"T\" full-time"}
        ],
        "schema": {"format": "date-time"},
        "tests": []
    }
]
"#;

#[test]
fn test_help() {
    speclink_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SpecLink"));
}

#[test]
fn test_version() {
    speclink_command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_annotates_citations() {
    let suite = suite_with_fixtures(&[("tests/draft7/format.json", FORMAT_FIXTURE)]);

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .success()
        .stdout(starts_with_remove_matcher())
        .stderr(stderr_not_contains(&["ERROR", "WARN"]))
        .stdout(annotation_count("notice", 2))
        .stdout(annotation_count("error", 0))
        .stdout(predicate::str::contains(
            "::notice file=tests/draft7/format.json,line=3,title=Specification Link::https://json-schema.org/draft-07/json-schema-core#rfc.section.7.3.1\n",
        ))
        .stdout(predicate::str::contains(
            "::notice file=tests/draft7/format.json,line=3,title=Specification Link::https://www.rfc-editor.org/rfc/rfc3339.txt#5.6\n\ndate-time = full-date \"T\" full-time\n",
        ));
}

#[test]
fn test_rfc_link_from_minimal_registry() {
    let suite = suite_with_registry(
        r#"{"json-schema": {"draft7": {"rfc": "https://www.rfc-editor.org/rfc/rfc{spec}#section-{section}"}}, "external": {}}"#,
    );
    write_fixture(
        suite.path(),
        "tests/draft7/keywords.json",
        r#"[{"description": "must", "specification": [{"rfc2119": "3"}]}]"#,
    );

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .success()
        .stdout(
            "::remove-matcher owner=me::\n\
             ::notice file=tests/draft7/keywords.json,line=1,title=Specification Link::https://www.rfc-editor.org/rfc/rfc2119#section-3\n",
        );
}

#[test]
fn test_excluded_versions_are_never_scanned() {
    // Neither version has URLs, so scanning them would fail the run
    let suite = suite_with_fixtures(&[
        ("tests/draft7/format.json", FORMAT_FIXTURE),
        ("tests/latest/format.json", FORMAT_FIXTURE),
        ("tests/draft-next/format.json", FORMAT_FIXTURE),
        ("tests/draft-next/bad.json", "[,]"),
    ]);

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .success()
        .stdout(no_annotations_under("tests/latest/"))
        .stdout(no_annotations_under("tests/draft-next/"))
        .stdout(annotation_for("notice", "tests/draft7/format.json"));
}

#[test]
fn test_malformed_file_is_reported_and_skipped() {
    let suite = suite_with_fixtures(&[
        ("tests/draft7/bad.json", "[\n    {\"description\": \"x\", \"specification\": [{\"core\": \"1\"}],}\n]\n"),
        ("tests/draft7/format.json", FORMAT_FIXTURE),
    ]);

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .success()
        .stdout(annotation_count("error", 1))
        .stdout(predicate::str::contains(
            "::error file=tests/draft7/bad.json,line=2,title=Invalid JSON,col=",
        ))
        .stdout(annotation_for("notice", "tests/draft7/bad.json").not())
        .stdout(annotation_count("notice", 2));
}

#[test]
fn test_malformed_file_message_has_no_position() {
    let suite = suite_with_fixtures(&[(
        "tests/draft7/bad.json",
        "[\n  {\"description\": \"x\",}\n]\n",
    )]);

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("title=Invalid JSON,col="))
        .stdout(predicate::str::contains("::trailing comma\n"))
        .stdout(predicate::str::contains(" at line ").not());
}

#[test]
fn test_unsupported_kind_does_not_stop_the_file() {
    let suite = suite_with_fixtures(&[(
        "tests/draft4/date.json",
        r#"[{"description": "dates", "specification": [{"iso8601": "5.2"}, {"validation": "7.3.1"}]}]"#,
    )]);

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "::error file=tests/draft4/date.json,line=1,title=Unsupported template 'iso'::",
        ))
        .stdout(predicate::str::contains(
            "https://json-schema.org/draft-04/draft-fge-json-schema-validation-00#rfc.section.7.3.1",
        ));
}

#[test]
fn test_non_json_files_and_top_level_files_are_ignored() {
    let suite = suite_with_fixtures(&[
        ("tests/README.md", "# fixtures"),
        ("tests/draft7/notes.txt", "not json {"),
        ("tests/draft7/optional/format.json", FORMAT_FIXTURE),
    ]);

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .success()
        .stdout(annotation_count("error", 0))
        .stdout(annotation_for("notice", "tests/draft7/optional/format.json"));
}

#[test]
fn test_unknown_version_fails_the_run() {
    let suite = suite_with_fixtures(&[("tests/draft2099/a.json", "[]")]);

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "No specification URLs for version 'draft2099'",
        ));
}

#[test]
fn test_null_specification_fails_the_run() {
    let suite = suite_with_fixtures(&[(
        "tests/draft7/a.json",
        r#"[{"description": "no citations", "specification": null}]"#,
    )]);

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("::notice").not())
        .stderr(predicate::str::contains("Unexpected fixture layout in tests/draft7/a.json"));
}

#[test]
fn test_malformed_citation_fails_the_run() {
    let suite = suite_with_fixtures(&[(
        "tests/draft7/a.json",
        r#"[{"description": "two keys", "specification": [{"core": "1", "validation": "2"}]}]"#,
    )]);

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed citation in tests/draft7/a.json"));
}

#[test]
fn test_config_file_overrides_layout() {
    let suite = suite_with_fixtures(&[
        ("fixtures/draft7/format.json", FORMAT_FIXTURE),
        (
            ".speclink.toml",
            "[suite]\ntests_dir = \"fixtures\"\n\n[output]\nmatcher_owner = \"spec-links\"\n",
        ),
    ]);

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("::remove-matcher owner=spec-links::\n"))
        .stdout(annotation_for("notice", "fixtures/draft7/format.json"));
}

#[test]
fn test_invalid_config_exits_with_config_code() {
    let suite = suite_with_fixtures(&[(".speclink.toml", "[suite\n")]);

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .failure()
        .code(101)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_missing_url_file_fails() {
    let suite = temp_dir();
    write_fixture(suite.path(), "tests/draft7/a.json", "[]");

    speclink_command()
        .arg("--root")
        .arg(suite.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("specification_urls.json"));
}

#[test]
fn test_json_report() {
    let suite = suite_with_fixtures(&[
        ("tests/draft7/format.json", FORMAT_FIXTURE),
        ("tests/latest/format.json", FORMAT_FIXTURE),
    ]);

    let output = speclink_command()
        .arg("--root")
        .arg(suite.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["success"], true);
    assert_eq!(report["stats"]["citations_linked"], 2);
    assert_eq!(report["stats"]["versions_skipped"], 1);
    assert_eq!(report["annotations"][0]["level"], "notice");
    assert_eq!(report["annotations"][0]["file"], "tests/draft7/format.json");
}

#[test]
fn test_json_error_report() {
    let suite = suite_with_fixtures(&[("tests/draft2099/a.json", "[]")]);

    let output = speclink_command()
        .arg("--root")
        .arg(suite.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["success"], false);
    assert_eq!(report["error"]["code"], "SCAN_FAILED");
}

#[test]
fn test_logs_stay_off_stdout() {
    let suite = suite_with_fixtures(&[("tests/draft7/format.json", FORMAT_FIXTURE)]);

    speclink_command()
        .env("RUST_LOG", "debug")
        .arg("--root")
        .arg(suite.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Scanned").not())
        .stderr(predicate::str::contains("Scanned 1 files"));
}

#[test]
fn test_json_logs_stay_off_stdout() {
    let suite = suite_with_fixtures(&[("tests/draft7/format.json", FORMAT_FIXTURE)]);

    speclink_command()
        .arg("--log-json")
        .arg("--root")
        .arg(suite.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("::remove-matcher"))
        .stderr(predicate::str::contains("\"level\":\"INFO\""));
}
