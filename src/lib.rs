// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! # wfcat - Workflow Catalog Generator
//!
//! `wfcat` assembles a declarative description of a multi-stage
//! computational pipeline and serializes it into the catalog files a grid
//! workflow-execution engine consumes: sites, transformations, replicas,
//! engine properties, and the job graph itself.
//!
//! The engine owns scheduling, data staging, container provisioning, and
//! retries. This crate ends at producing a correct, consistent
//! specification: it never runs a job, it only describes jobs and their
//! data relationships.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wfcat::catalog::{Properties, ReplicaCatalog, SiteCatalog, TransformationCatalog};
//! use wfcat::workflow::{Job, Workflow, WorkflowValidator};
//! use wfcat::writer::CatalogWriter;
//!
//! # fn main() -> Result<(), wfcat::WfcatError> {
//! let sites = SiteCatalog::new();
//! let transformations = TransformationCatalog::new();
//! let mut replicas = ReplicaCatalog::new();
//! replicas.add_replica("local", "dataset.tar.gz", "input/dataset.tar.gz");
//!
//! let mut workflow = Workflow::new("my_workflow");
//! workflow.add_job(
//!     Job::new("motion_module")
//!         .add_inputs(["dataset.tar.gz"])
//!         .add_outputs(["motion_output.tar.gz"], true, false),
//! )?;
//!
//! let report = WorkflowValidator::validate(&workflow, &transformations, &replicas)?;
//! println!("{} inferred edges", report.graph.edge_count());
//!
//! CatalogWriter::new(".").write(
//!     &Properties::new(),
//!     &sites,
//!     &replicas,
//!     &transformations,
//!     &workflow,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod errors;
pub mod workflow;
pub mod writer;

// Re-export commonly used types
pub use catalog::{Properties, ReplicaCatalog, SiteCatalog, TransformationCatalog};
pub use errors::{WfcatError, WfcatResult};
pub use workflow::{DependencyGraph, Job, Workflow, WorkflowValidator};
pub use writer::CatalogWriter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
