// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! Workflow definition and dependency inference
//!
//! This module defines jobs and the artifacts that connect them, derives
//! the execution DAG from shared artifact names, and cross-checks the
//! workflow against the catalogs before serialization.

mod dag;
mod definition;
mod validation;

pub use dag::DependencyGraph;
pub use definition::{Artifact, Job, JobOutput, Workflow};
pub use validation::{ValidationReport, WorkflowValidator};
