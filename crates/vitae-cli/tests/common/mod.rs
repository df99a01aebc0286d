//! Shared fixtures for CLI tests.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use tempfile::TempDir;

pub const PROFILE: &str = "name: Ada Lovelace\ntitle: Analyst\nphone: \"+44 20 7946\"\n";

/// A working directory laid out the way `cv` expects by default.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new(profile: &str) -> Self {
        let project = Self::empty();
        project.write("data/content/profile.yaml", profile);
        project.write(
            "data/content/experience.yaml",
            "- company: Analytical Engines Ltd\n  role: Programmer\n",
        );
        project.write(
            "templates/creative/creative.hbs",
            "<html><head><style>{{{css}}}</style></head><body>\
             <h1>{{profile.name}}</h1>\
             <a href=\"tel:{{phoneDigits profile.phone}}\">call</a>\
             {{#each experience}}<p>{{role}}</p>{{/each}}</body></html>",
        );
        project.write("templates/creative/styles/creative.css", "h1{color:#333}");
        project.write("templates/ats/ats.hbs", "<p>{{profile.name}}</p>");
        project
    }

    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// `cv` running in this directory, isolated from the user's config.
    pub fn cv(&self) -> Command {
        let mut cmd = Command::cargo_bin("cv").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path().join("home"))
            .env("XDG_CONFIG_HOME", self.path().join("home/.config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Generated PDFs in `dir` (relative to the project).
    pub fn pdfs(&self, dir: &str) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.path().join(dir)) else {
            return Vec::new();
        };
        let mut names: Vec<_> = entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".pdf"))
            .collect();
        names.sort();
        names
    }

    /// Shell script standing in for Chromium: writes a tiny PDF to the
    /// `--print-to-pdf` target.
    #[cfg(unix)]
    pub fn fake_browser(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.path().join("fake-chromium");
        fs::write(
            &script,
            r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    --print-to-pdf=*) out="${arg#--print-to-pdf=}" ;;
  esac
done
printf '%s' '%PDF-1.7 fake' > "$out"
"#,
        )
        .unwrap();
        let mut perms = fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).unwrap();
        script
    }
}
