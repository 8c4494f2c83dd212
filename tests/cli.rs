// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! End-to-end test: run the generator in a scratch directory and check
//! the catalog files it leaves behind.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn generates_five_catalog_files() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("wfcat")
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating coconet workflow dag..."));

    for file in [
        "properties.yml",
        "sites.yml",
        "replicas.yml",
        "transformations.yml",
        "workflow.yml",
    ] {
        assert!(dir.path().join(file).exists(), "missing {file}");
    }

    // The two jobs share only externally supplied inputs, so the persisted
    // graph carries no producer/consumer coupling between them
    let workflow = std::fs::read_to_string(dir.path().join("workflow.yml")).unwrap();
    assert!(workflow.contains("transformation: motion_module"));
    assert!(workflow.contains("transformation: detection_module"));
    assert!(workflow.contains("lfn: detection_output.tar.gz"));
}

#[test]
fn output_flag_renames_workflow_file() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("wfcat")
        .unwrap()
        .current_dir(dir.path())
        .args(["-o", "coconet.yml"])
        .assert()
        .success();

    assert!(dir.path().join("coconet.yml").exists());
    assert!(!dir.path().join("workflow.yml").exists());
}
