// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! Workflow and job structures
//!
//! Jobs reference transformations by name and bind named artifacts as
//! inputs and outputs. Execution-order edges are never declared directly;
//! they are inferred from shared artifact names (see [`super::DependencyGraph`]),
//! and the persisted form carries only the artifact references so the
//! engine can repeat the same inference at submission time.

use serde::{Deserialize, Serialize};

use crate::errors::WfcatError;

/// A complete workflow description: a named set of jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Workflow name
    pub name: String,

    /// Jobs in declaration order
    pub jobs: Vec<Job>,
}

impl Workflow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            jobs: Vec::new(),
        }
    }

    /// Add a job. Jobs are keyed by the transformation they invoke;
    /// a duplicate is rejected.
    pub fn add_job(&mut self, job: Job) -> Result<(), WfcatError> {
        if self.jobs.iter().any(|j| j.transformation == job.transformation) {
            return Err(WfcatError::DuplicateJob {
                name: job.transformation,
            });
        }
        self.jobs.push(job);
        Ok(())
    }

    /// Get a job by name
    pub fn get_job(&self, name: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.transformation == name)
    }

    /// All job names in declaration order
    pub fn job_names(&self) -> Vec<&str> {
        self.jobs.iter().map(|j| j.transformation.as_str()).collect()
    }

    /// Serialize the workflow to YAML
    pub fn to_yaml(&self) -> Result<String, WfcatError> {
        serde_yaml::to_string(self).map_err(Into::into)
    }
}

/// A single job instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Name of the transformation this job invokes; doubles as the job's
    /// own identity within the workflow
    pub transformation: String,

    /// Input artifacts, in declaration order
    #[serde(default)]
    pub inputs: Vec<Artifact>,

    /// Output artifacts, in declaration order
    #[serde(default)]
    pub outputs: Vec<JobOutput>,
}

impl Job {
    pub fn new(transformation: impl Into<String>) -> Self {
        Self {
            transformation: transformation.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Bind input artifacts to this job
    pub fn add_inputs<I, A>(mut self, artifacts: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Artifact>,
    {
        self.inputs.extend(artifacts.into_iter().map(Into::into));
        self
    }

    /// Bind output artifacts to this job, all with the same staging flags
    pub fn add_outputs<I, A>(mut self, artifacts: I, stage_out: bool, register_replica: bool) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Artifact>,
    {
        self.outputs
            .extend(artifacts.into_iter().map(|a| JobOutput {
                artifact: a.into(),
                stage_out,
                register_replica,
            }));
        self
    }

    /// Names of this job's input artifacts
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|a| a.name.as_str())
    }

    /// Names of this job's output artifacts
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|o| o.artifact.name.as_str())
    }
}

/// A named logical data unit flowing between jobs.
///
/// Artifacts carry no content; the name is a handle connecting the job
/// that produces it to the jobs that consume it, or to a replica entry
/// when the data pre-exists. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Artifact {
    pub name: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for Artifact {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Artifact {
    fn from(name: String) -> Self {
        Self { name }
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An output artifact with its staging flags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOutput {
    /// The produced artifact
    #[serde(rename = "lfn")]
    pub artifact: Artifact,

    /// Whether the artifact is copied to long-term storage after production
    pub stage_out: bool,

    /// Whether the artifact is registered as a new replica entry after
    /// production
    pub register_replica: bool,
}
