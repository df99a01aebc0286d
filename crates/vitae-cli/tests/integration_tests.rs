//! End-to-end runs of the `cv` binary.

mod common;

use common::{PROFILE, Project};
use predicates::prelude::*;

#[test]
fn help_mentions_template_flag() {
    Project::empty()
        .cv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--template"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn version_flag() {
    Project::empty()
        .cv()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_color_accepts_any_conventional_value() {
    for value in ["1", "true", "yes", "0", "false", ""] {
        Project::empty()
            .cv()
            .env("NO_COLOR", value)
            .arg("--version")
            .assert()
            .success();
        // Parse errors exit 2; a missing data directory exits 3.
        Project::empty()
            .cv()
            .env("NO_COLOR", value)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("invalid value").not());
    }
}

#[cfg(unix)]
mod with_fake_browser {
    use super::*;
    use std::fs;

    #[test]
    fn generates_cv_with_default_template() {
        let project = Project::new(PROFILE);
        let browser = project.fake_browser();

        project
            .cv()
            .env("CV__RENDERER__BINARY", &browser)
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "\u{2713} CV generated: CV-Creative_Ada-Lovelace_",
            ))
            .stdout(predicate::str::contains(".pdf"));

        let pdfs = project.pdfs(".");
        assert_eq!(pdfs.len(), 1, "{pdfs:?}");
        assert!(pdfs[0].starts_with("CV-Creative_Ada-Lovelace_"));
        let bytes = fs::read(project.path().join(&pdfs[0])).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn quiet_prints_only_the_path() {
        let project = Project::new(PROFILE);
        let browser = project.fake_browser();

        let assert = project
            .cv()
            .args(["-q", "-t", "ats"])
            .env("CV__RENDERER__BINARY", &browser)
            .assert()
            .success()
            .stderr(predicate::str::is_empty());

        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let pdfs = project.pdfs(".");
        assert_eq!(stdout, format!("{}\n", pdfs[0]));
        assert!(pdfs[0].starts_with("CV-Ats_Ada-Lovelace_"));
    }

    #[test]
    fn local_config_sets_template_and_output_dir() {
        let project = Project::new(PROFILE);
        let browser = project.fake_browser();
        project.write(
            "cv.toml",
            &format!(
                "[templates]\ndefault = \"ats\"\n\n[output]\ndir = \"out\"\n\n\
                 [renderer]\nbinary = \"{}\"\nstamp = false\n",
                browser.display()
            ),
        );

        project.cv().assert().success();

        assert!(project.pdfs(".").is_empty());
        let pdfs = project.pdfs("out");
        assert_eq!(pdfs.len(), 1);
        assert!(pdfs[0].starts_with("CV-Ats_Ada-Lovelace_"));
    }

    #[test]
    fn json_output_reports_the_build() {
        let project = Project::new(PROFILE);
        let browser = project.fake_browser();

        project
            .cv()
            .args(["--output-format", "json"])
            .env("CV__RENDERER__BINARY", &browser)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"template\":\"creative\""))
            .stdout(predicate::str::contains("\"subject_name\":\"Ada Lovelace\""));
    }

    #[test]
    fn data_dir_from_environment() {
        let project = Project::empty();
        project.write("elsewhere/profile.yaml", "name: Grace Hopper\n");
        project.write("templates/creative/creative.hbs", "{{profile.name}}");
        let browser = project.fake_browser();

        project
            .cv()
            .env("CV__DATA__BASE_DIR", project.path().join("elsewhere"))
            .env("CV__RENDERER__BINARY", &browser)
            .assert()
            .success();

        let pdfs = project.pdfs(".");
        assert!(pdfs[0].starts_with("CV-Creative_Grace-Hopper_"));
    }
}
