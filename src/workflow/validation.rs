// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! Cross-catalog workflow validation
//!
//! The execution engine re-validates everything at submission time; these
//! checks exist to fail fast on the client side, before any catalog file
//! is written.

use tracing::debug;

use crate::catalog::{ReplicaCatalog, TransformationCatalog};
use crate::errors::WfcatError;
use crate::workflow::{DependencyGraph, Workflow};

/// Validator for a finished workflow against its catalogs
pub struct WorkflowValidator;

impl WorkflowValidator {
    /// Validate a workflow and return its inferred dependency graph.
    ///
    /// Fails on the first unknown transformation reference, duplicate
    /// producer, cycle, or input artifact that neither a job nor the
    /// replica catalog supplies. Non-fatal findings are collected as
    /// warnings.
    pub fn validate(
        workflow: &Workflow,
        transformations: &TransformationCatalog,
        replicas: &ReplicaCatalog,
    ) -> Result<ValidationReport, WfcatError> {
        // Every job must invoke a cataloged transformation
        for job in &workflow.jobs {
            if transformations
                .get_transformation(&job.transformation)
                .is_none()
            {
                return Err(WfcatError::UnknownTransformation {
                    job: job.transformation.clone(),
                    transformation: job.transformation.clone(),
                });
            }
        }

        // Duplicate-producer and cycle checks happen during inference
        let graph = DependencyGraph::build(workflow)?;

        // Inputs with no producing job must pre-exist as replicas
        for (job, artifact) in graph.external_inputs() {
            if !replicas.contains(artifact) {
                return Err(WfcatError::MissingArtifact {
                    job: job.clone(),
                    artifact: artifact.clone(),
                });
            }
        }

        let mut report = ValidationReport::new(graph);

        // Declared but unused entries are legal; flag them anyway
        for tr in &transformations.transformations {
            if workflow.get_job(&tr.name).is_none() {
                report.add_warning(format!(
                    "Transformation '{}' is cataloged but no job invokes it",
                    tr.name
                ));
            }
        }
        for entry in &replicas.replicas {
            let consumed = workflow
                .jobs
                .iter()
                .any(|j| j.input_names().any(|i| i == entry.lfn));
            if !consumed {
                report.add_warning(format!(
                    "Replica '{}' on site '{}' is not consumed by any job",
                    entry.lfn, entry.site
                ));
            }
        }

        debug!(
            jobs = workflow.jobs.len(),
            edges = report.graph.edge_count(),
            warnings = report.warnings.len(),
            "workflow validated"
        );

        Ok(report)
    }
}

/// Outcome of a successful validation
pub struct ValidationReport {
    /// The inferred dependency graph
    pub graph: DependencyGraph,
    /// Non-fatal findings
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn new(graph: DependencyGraph) -> Self {
        Self {
            graph,
            warnings: Vec::new(),
        }
    }

    fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Transformation;
    use crate::workflow::Job;

    fn catalog_with(names: &[&str]) -> TransformationCatalog {
        let mut tc = TransformationCatalog::new();
        for name in names {
            tc.add_transformation(Transformation::new(
                *name,
                "condorpool",
                format!("bin/{}_wrapper.sh", name),
                true,
            ))
            .unwrap();
        }
        tc
    }

    #[test]
    fn test_missing_artifact_rejected() {
        let mut wf = Workflow::new("test");
        wf.add_job(Job::new("c").add_inputs(["nowhere.dat"]))
            .unwrap();

        let result =
            WorkflowValidator::validate(&wf, &catalog_with(&["c"]), &ReplicaCatalog::new());
        match result {
            Err(WfcatError::MissingArtifact { job, artifact }) => {
                assert_eq!(job, "c");
                assert_eq!(artifact, "nowhere.dat");
            }
            _ => panic!("Expected MissingArtifact"),
        }
    }

    #[test]
    fn test_replica_satisfies_external_input() {
        let mut wf = Workflow::new("test");
        wf.add_job(
            Job::new("c")
                .add_inputs(["dataset.tar.gz"])
                .add_outputs(["out.tar.gz"], true, false),
        )
        .unwrap();

        let mut rc = ReplicaCatalog::new();
        rc.add_replica("local", "dataset.tar.gz", "input/dataset.tar.gz");

        let report = WorkflowValidator::validate(&wf, &catalog_with(&["c"]), &rc).unwrap();
        assert_eq!(report.graph.edge_count(), 0);
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_job_produced_input_needs_no_replica() {
        let mut wf = Workflow::new("test");
        wf.add_job(Job::new("p").add_outputs(["mid.dat"], false, false))
            .unwrap();
        wf.add_job(Job::new("c").add_inputs(["mid.dat"])).unwrap();

        let report =
            WorkflowValidator::validate(&wf, &catalog_with(&["p", "c"]), &ReplicaCatalog::new())
                .unwrap();
        assert!(report.graph.has_edge("p", "c"));
    }

    #[test]
    fn test_unknown_transformation_rejected() {
        let mut wf = Workflow::new("test");
        wf.add_job(Job::new("ghost")).unwrap();

        let result =
            WorkflowValidator::validate(&wf, &catalog_with(&[]), &ReplicaCatalog::new());
        assert!(matches!(
            result,
            Err(WfcatError::UnknownTransformation { .. })
        ));
    }

    #[test]
    fn test_unused_entries_warn() {
        let mut wf = Workflow::new("test");
        wf.add_job(Job::new("used")).unwrap();

        let mut rc = ReplicaCatalog::new();
        rc.add_replica("local", "orphan.dat", "input/orphan.dat");

        let report =
            WorkflowValidator::validate(&wf, &catalog_with(&["used", "spare"]), &rc).unwrap();
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings.iter().any(|w| w.contains("spare")));
        assert!(report.warnings.iter().any(|w| w.contains("orphan.dat")));
    }
}
