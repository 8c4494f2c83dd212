// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! wfcat - Workflow Catalog Generator
//!
//! Assembles the coconet video-analytics workflow and writes the catalog
//! files its execution engine consumes.

use clap::Parser;
use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wfcat::catalog::{
    Container, ContainerFormat, Directory, DirectoryRole, FileServer, FileServerOperation,
    Properties, ReplicaCatalog, Site, SiteCatalog, Transformation, TransformationCatalog,
};
use wfcat::workflow::{Job, Workflow, WorkflowValidator};
use wfcat::writer::CatalogWriter;

/// Name of the execution site all transformations run on
const EXEC_SITE: &str = "condorpool";

/// Generate workflow catalogs for the coconet pipeline
#[derive(Parser, Debug)]
#[clap(
    name = "wfcat",
    version,
    about = "Workflow catalog generator for grid execution engines"
)]
struct Cli {
    /// Output file for the workflow graph
    #[clap(short, long, value_name = "STR", default_value = "workflow.yml")]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wfcat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let wf_dir = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to resolve working directory: {}", e))?;

    println!("Creating execution sites...");
    let sites = build_site_catalog(&wf_dir)?;

    println!("Creating workflow properties...");
    let properties = Properties::new();

    println!("Creating transformation catalog...");
    let transformations = build_transformation_catalog(&wf_dir)?;

    println!("Creating replica catalog...");
    let replicas = build_replica_catalog(&wf_dir);

    println!("Creating coconet workflow dag...");
    let workflow = build_workflow()?;

    let report = WorkflowValidator::validate(&workflow, &transformations, &replicas)?;
    for warning in &report.warnings {
        println!("  {} {}", "⚠".yellow(), warning);
    }
    println!(
        "  {} {} jobs, {} inferred dependencies",
        "✓".green(),
        workflow.jobs.len(),
        report.graph.edge_count()
    );

    let writer = CatalogWriter::new(&wf_dir).with_workflow_file(&cli.output);
    writer.write(&properties, &sites, &replicas, &transformations, &workflow)?;

    println!(
        "  {} Wrote catalogs to {}",
        "✓".green(),
        wf_dir.display().to_string().dimmed()
    );

    Ok(())
}

/// Declare the local storage site and the condorpool execution site
fn build_site_catalog(wf_dir: &Path) -> Result<SiteCatalog> {
    let shared_scratch_dir = wf_dir.join("scratch");
    let local_storage_dir = wf_dir.join("output");

    let local = Site::new("local")
        .add_directory(
            Directory::new(
                DirectoryRole::SharedScratch,
                shared_scratch_dir.display().to_string(),
            )
            .add_file_server(FileServer::new(
                format!("file://{}", shared_scratch_dir.display()),
                FileServerOperation::All,
            )),
        )
        .add_directory(
            Directory::new(
                DirectoryRole::LocalStorage,
                local_storage_dir.display().to_string(),
            )
            .add_file_server(FileServer::new(
                format!("file://{}", local_storage_dir.display()),
                FileServerOperation::All,
            )),
        );

    // Profile values are opaque here; the engine maps them to its batch
    // system adapter and container I/O mode
    let exec_site = Site::new(EXEC_SITE)
        .add_profile("pegasus", "style", "condor")
        .add_profile("pegasus", "data.configuration", "condorio")
        .add_profile("condor", "universe", "vanilla");

    let mut catalog = SiteCatalog::new();
    catalog.add_site(local)?;
    catalog.add_site(exec_site)?;
    Ok(catalog)
}

/// Declare the containers and the executables that run in them
fn build_transformation_catalog(wf_dir: &Path) -> Result<TransformationCatalog> {
    let mut catalog = TransformationCatalog::new();

    catalog.add_container(Container::new(
        "motion_container",
        ContainerFormat::Docker,
        wf_dir.join("containers/motion_container.tar"),
        EXEC_SITE,
    ))?;
    catalog.add_container(Container::new(
        "detection_container",
        ContainerFormat::Docker,
        wf_dir.join("containers/detection_container.tar"),
        EXEC_SITE,
    ))?;

    catalog.add_transformation(
        Transformation::new(
            "motion_module",
            EXEC_SITE,
            wf_dir.join("bin/motion_module_wrapper.sh"),
            true,
        )
        .in_container("motion_container"),
    )?;
    catalog.add_transformation(
        Transformation::new(
            "detection_module",
            EXEC_SITE,
            wf_dir.join("bin/detection_module_wrapper.sh"),
            true,
        )
        .in_container("detection_container"),
    )?;
    // Pre-installed at the site, never staged
    catalog.add_transformation(Transformation::new(
        "tracking_fusion_module",
        EXEC_SITE,
        wf_dir.join("bin/tracking_fusion_module_wrapper.sh"),
        false,
    ))?;

    Ok(catalog)
}

/// Declare the input data that exists before the workflow runs
fn build_replica_catalog(wf_dir: &Path) -> ReplicaCatalog {
    let mut catalog = ReplicaCatalog::new();
    catalog
        .add_replica("local", "dataset.tar.gz", wf_dir.join("input/dataset.tar.gz"))
        .add_replica("local", "yolov3.cfg", wf_dir.join("input/yolov3.cfg"))
        .add_replica("local", "yolov3.weights", wf_dir.join("input/yolov3.weights"));
    catalog
}

/// Declare the jobs and the artifacts that connect them
fn build_workflow() -> Result<Workflow> {
    let mut workflow = Workflow::new("coconet_workflow");

    workflow.add_job(
        Job::new("motion_module")
            .add_inputs(["dataset.tar.gz"])
            .add_outputs(["motion_output.tar.gz"], true, false),
    )?;

    workflow.add_job(
        Job::new("detection_module")
            .add_inputs(["dataset.tar.gz", "yolov3.cfg", "yolov3.weights"])
            .add_outputs(["detection_output.tar.gz"], true, false),
    )?;

    Ok(workflow)
}
