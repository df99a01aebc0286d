//! Failure paths: exit codes and the error block on stderr.

mod common;

use common::{PROFILE, Project};
use predicates::prelude::*;

#[test]
fn missing_data_is_not_found() {
    let project = Project::empty();
    project.write("templates/creative/creative.hbs", "x");

    project
        .cv()
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No CV data available"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(project.pdfs(".").is_empty());
}

#[test]
fn missing_name_is_invalid_input() {
    let project = Project::new("title: Analyst\n");

    project
        .cv()
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Invalid data: 'profile.name' is required",
        ));

    assert!(project.pdfs(".").is_empty());
}

#[test]
fn blank_name_is_invalid_input() {
    let project = Project::new("name: \"   \"\n");
    project.cv().assert().code(2);
}

#[test]
fn unknown_template_lists_available() {
    let project = Project::new(PROFILE);

    project
        .cv()
        .args(["--template", "nonexistent"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Template not found: 'nonexistent'"))
        .stderr(predicate::str::contains("ats"))
        .stderr(predicate::str::contains("creative"));

    assert!(project.pdfs(".").is_empty());
}

#[test]
fn path_like_template_is_not_found() {
    let project = Project::new(PROFILE);
    project.cv().args(["-t", "../templates"]).assert().code(3);
}

#[test]
fn blank_template_is_invalid_input() {
    let project = Project::new(PROFILE);
    project.cv().args(["-t", "  "]).assert().code(2);
}

#[test]
fn template_syntax_error_is_invalid_input() {
    let project = Project::new(PROFILE);
    project.write("templates/broken/broken.hbs", "{{#if profile}}never closed");

    project
        .cv()
        .args(["-t", "broken"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to render"));
}

#[test]
fn missing_browser_is_render_failure() {
    let project = Project::new(PROFILE);

    project
        .cv()
        .env("CV__RENDERER__BINARY", project.path().join("no-such-browser"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to render document"))
        .stderr(predicate::str::contains("unavailable"));

    assert!(project.pdfs(".").is_empty());
}

#[test]
fn missing_config_file_is_configuration_error() {
    let project = Project::new(PROFILE);

    project
        .cv()
        .args(["--config", "absent.toml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn malformed_local_config_is_configuration_error() {
    let project = Project::new(PROFILE);
    project.write("cv.toml", "[templates\n");

    project.cv().assert().code(4);
}

#[test]
fn quiet_and_verbose_conflict() {
    let project = Project::new(PROFILE);
    project.cv().args(["-q", "-v"]).assert().code(2);
}

#[test]
fn verbose_failure_shows_no_hint() {
    let project = Project::empty();

    project
        .cv()
        .arg("-v")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--verbose").not());
}
