use std::error::Error;
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli() -> Result<Command, Box<dyn Error>> {
    Ok(Command::cargo_bin("bundlepad-cli")?)
}

#[test]
fn defaults_lists_entry_then_config() -> Result<(), Box<dyn Error>> {
    cli()?
        .arg("defaults")
        .assert()
        .success()
        .stdout("index.ts\nesbuild.config.json\n");
    Ok(())
}

#[test]
fn defaults_json_for_react_preset() -> Result<(), Box<dyn Error>> {
    let output = cli()?
        .args(["defaults", "--preset", "react", "--json"])
        .output()?;
    assert!(output.status.success());
    let files: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let names: Vec<_> = files
        .as_array()
        .expect("array of records")
        .iter()
        .map(|file| file["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["index.tsx", "App.tsx", "esbuild.config.json"]);
    Ok(())
}

#[test]
fn check_config_reports_options() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("esbuild.config.json");
    fs::write(
        &path,
        r#"{ "format": "esm", "jsx": "automatic", "jsxImportSource": "preact", "target": "es2020" }"#,
    )?;

    cli()?
        .args(["check-config", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("format: esm")
                .and(predicate::str::contains("minify: (bundler default)"))
                .and(predicate::str::contains("jsxImportSource: preact"))
                .and(predicate::str::contains("preserved unknown keys: 1")),
        );
    Ok(())
}

#[test]
fn check_config_rejects_malformed_json() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.json");
    fs::write(&path, "{not json")?;

    cli()?
        .args(["check-config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid bundler configuration"));
    Ok(())
}

#[test]
fn resolve_local_and_cdn_imports() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let snapshot = dir.path().join("project.json");
    fs::write(
        &snapshot,
        r#"[
            { "name": "index.ts", "content": "import { sum } from './sum'" },
            { "name": "sum.ts", "content": "import _ from 'lodash'" },
            { "name": "esbuild.config.json", "content": "{\"cdnUrl\": \"https://cdn.skypack.dev/\"}" }
        ]"#,
    )?;
    let project = snapshot.to_str().unwrap();

    cli()?
        .args(["resolve", "--project", project, "--from", "index.ts", "./sum"])
        .assert()
        .success()
        .stdout("local:sum.ts\n");

    cli()?
        .args(["resolve", "--project", project, "--from", "sum.ts", "lodash"])
        .assert()
        .success()
        .stdout("remote:https://cdn.skypack.dev/lodash\n");

    cli()?
        .args(["resolve", "--project", project, "--from", "index.ts", "./missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot resolve"));
    Ok(())
}

#[test]
fn resolve_requires_config_in_snapshot() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let snapshot = dir.path().join("project.json");
    fs::write(&snapshot, r#"[{ "name": "index.ts", "content": "" }]"#)?;

    cli()?
        .args([
            "resolve",
            "--project",
            snapshot.to_str().unwrap(),
            "--from",
            "index.ts",
            "./x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("esbuild.config.json not found"));
    Ok(())
}
