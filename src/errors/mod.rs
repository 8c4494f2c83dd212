// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! Error types for catalog construction and serialization
//!
//! Every error is raised at the point of detection and never recovered
//! internally; the process aborts with a diagnostic naming the offending
//! entity. Retries, if any, belong to the execution engine at run time.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for wfcat operations
pub type WfcatResult<T> = Result<T, WfcatError>;

/// Main error type for wfcat
#[derive(Error, Debug, Diagnostic)]
pub enum WfcatError {
    // ─────────────────────────────────────────────────────────────────────────
    // Registration Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Site '{name}' is already registered")]
    #[diagnostic(
        code(wfcat::duplicate_site),
        help("Each execution or storage site may be added to the site catalog once")
    )]
    DuplicateSite { name: String },

    #[error("Container '{name}' is already registered")]
    #[diagnostic(code(wfcat::duplicate_container))]
    DuplicateContainer { name: String },

    #[error("Transformation '{name}' is already registered")]
    #[diagnostic(code(wfcat::duplicate_transformation))]
    DuplicateTransformation { name: String },

    #[error("Job '{name}' is already declared in the workflow")]
    #[diagnostic(
        code(wfcat::duplicate_job),
        help("Jobs are keyed by the transformation they invoke; declare each once")
    )]
    DuplicateJob { name: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Reference Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Transformation '{transformation}' references unknown container '{container}'")]
    #[diagnostic(
        code(wfcat::unknown_container),
        help("Add the container with add_container() before the transformation that uses it")
    )]
    UnknownContainer {
        transformation: String,
        container: String,
    },

    #[error("Job '{job}' invokes unknown transformation '{transformation}'")]
    #[diagnostic(
        code(wfcat::unknown_transformation),
        help("Check that '{transformation}' is declared in the transformation catalog")
    )]
    UnknownTransformation { job: String, transformation: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Graph Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Artifact '{artifact}' is produced by both '{first}' and '{second}'")]
    #[diagnostic(
        code(wfcat::duplicate_producer),
        help("An artifact must have at most one producing job; provenance is ambiguous")
    )]
    DuplicateProducer {
        artifact: String,
        first: String,
        second: String,
    },

    #[error("Job '{job}' consumes artifact '{artifact}' with no producer and no replica entry")]
    #[diagnostic(
        code(wfcat::missing_artifact),
        help("Either add a replica entry for '{artifact}' or a job that outputs it")
    )]
    MissingArtifact { job: String, artifact: String },

    #[error("Circular dependency detected in the job graph")]
    #[diagnostic(
        code(wfcat::circular_dependency),
        help("Review job inputs and outputs to remove the produce/consume cycle")
    )]
    CircularDependency { jobs: Vec<String> },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to write catalog file '{path}': {error}")]
    #[diagnostic(code(wfcat::file_write_error))]
    FileWrite { path: PathBuf, error: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(wfcat::io_error))]
    Io { message: String },

    #[error("YAML serialization error: {message}")]
    #[diagnostic(code(wfcat::yaml_error))]
    Yaml { message: String },
}

impl From<std::io::Error> for WfcatError {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            message: e.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for WfcatError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml {
            message: e.to_string(),
        }
    }
}

impl WfcatError {
    /// Create a file write error with context
    pub fn file_write(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            error: error.to_string(),
        }
    }
}
