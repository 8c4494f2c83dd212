// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! Dependency inference for the job graph
//!
//! Derives producer→consumer edges from shared artifact names and checks
//! the result is acyclic. The engine repeats this inference at submission
//! time; this pass is a client-side consistency pre-check, not the
//! authoritative scheduling order.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::errors::WfcatError;
use crate::workflow::Workflow;

/// The inferred job dependency DAG
///
/// Immutable once built: nodes are jobs, an edge P → J means J consumes
/// an artifact P produces.
pub struct DependencyGraph {
    graph: DiGraph<usize, ()>,
    name_to_index: HashMap<String, NodeIndex>,
    index_to_name: HashMap<NodeIndex, String>,
    /// Artifact name → the single job that produces it
    producers: HashMap<String, String>,
    /// (job, artifact) inputs with no producing job, assumed externally
    /// supplied; the validator checks these against the replica catalog
    external: Vec<(String, String)>,
}

impl DependencyGraph {
    fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_to_index: HashMap::new(),
            index_to_name: HashMap::new(),
            producers: HashMap::new(),
            external: Vec::new(),
        }
    }

    /// Infer the dependency DAG for a workflow
    pub fn build(workflow: &Workflow) -> Result<Self, WfcatError> {
        let mut builder = Self::new();

        // Add all jobs as nodes
        for (idx, job) in workflow.jobs.iter().enumerate() {
            let node = builder.graph.add_node(idx);
            builder
                .name_to_index
                .insert(job.transformation.clone(), node);
            builder
                .index_to_name
                .insert(node, job.transformation.clone());
        }

        // Map each artifact to its producing job; a second producer is
        // ambiguous provenance and fails immediately
        for job in &workflow.jobs {
            for output in job.output_names() {
                if let Some(first) = builder
                    .producers
                    .insert(output.to_string(), job.transformation.clone())
                {
                    return Err(WfcatError::DuplicateProducer {
                        artifact: output.to_string(),
                        first,
                        second: job.transformation.clone(),
                    });
                }
            }
        }

        // Add an edge producer → consumer for every consumed artifact that
        // some other job produces
        for job in &workflow.jobs {
            let consumer = builder.name_to_index[&job.transformation];

            for input in job.input_names() {
                match builder.producers.get(input) {
                    Some(producer) if producer != &job.transformation => {
                        let producer_node = builder.name_to_index[producer.as_str()];
                        // Two shared artifacts between the same pair still
                        // mean one edge
                        if !builder.graph.contains_edge(producer_node, consumer) {
                            builder.graph.add_edge(producer_node, consumer, ());
                        }
                    }
                    Some(_) => {}
                    None => builder
                        .external
                        .push((job.transformation.clone(), input.to_string())),
                }
            }
        }

        builder.validate_acyclic()?;

        Ok(builder)
    }

    /// Validate that the graph is acyclic
    fn validate_acyclic(&self) -> Result<(), WfcatError> {
        match toposort(&self.graph, None) {
            Ok(_) => Ok(()),
            Err(cycle) => Err(WfcatError::CircularDependency {
                jobs: self.find_cycle_members(cycle.node_id()),
            }),
        }
    }

    /// Find the jobs involved in a cycle
    fn find_cycle_members(&self, start: NodeIndex) -> Vec<String> {
        use petgraph::visit::{depth_first_search, DfsEvent};

        let mut in_cycle = vec![self.index_to_name[&start].clone()];
        let mut visited = std::collections::HashSet::new();

        depth_first_search(&self.graph, Some(start), |event| {
            if let DfsEvent::Discover(node, _) = event {
                let name = &self.index_to_name[&node];
                if visited.contains(name) {
                    in_cycle.push(name.clone());
                    return petgraph::visit::Control::Break(());
                }
                visited.insert(name.clone());
                in_cycle.push(name.clone());
            }
            petgraph::visit::Control::Continue
        });

        in_cycle
    }

    /// The job producing an artifact, if any job declares it as an output
    pub fn producer(&self, artifact: &str) -> Option<&str> {
        self.producers.get(artifact).map(String::as_str)
    }

    /// Inputs with no producing job, in declaration order
    pub fn external_inputs(&self) -> &[(String, String)] {
        &self.external
    }

    /// Number of inferred edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All inferred edges as (producer, consumer) name pairs
    pub fn edges(&self) -> Vec<(String, String)> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(from, to)| {
                (
                    self.index_to_name[&from].clone(),
                    self.index_to_name[&to].clone(),
                )
            })
            .collect()
    }

    /// Check whether the edge producer → consumer was inferred
    pub fn has_edge(&self, producer: &str, consumer: &str) -> bool {
        match (
            self.name_to_index.get(producer),
            self.name_to_index.get(consumer),
        ) {
            (Some(p), Some(c)) => self.graph.contains_edge(*p, *c),
            _ => false,
        }
    }

    /// Job names in a valid execution order
    pub fn topological_order(&self) -> Result<Vec<String>, WfcatError> {
        toposort(&self.graph, None)
            .map(|nodes| {
                nodes
                    .into_iter()
                    .map(|n| self.index_to_name[&n].clone())
                    .collect()
            })
            .map_err(|cycle| WfcatError::CircularDependency {
                jobs: self.find_cycle_members(cycle.node_id()),
            })
    }

    /// Jobs that must run before the named job
    pub fn dependencies(&self, job: &str) -> Option<Vec<String>> {
        let node = self.name_to_index.get(job)?;
        Some(
            self.graph
                .neighbors_directed(*node, petgraph::Direction::Incoming)
                .map(|n| self.index_to_name[&n].clone())
                .collect(),
        )
    }

    /// Jobs that consume the named job's outputs
    pub fn dependents(&self, job: &str) -> Option<Vec<String>> {
        let node = self.name_to_index.get(job)?;
        Some(
            self.graph
                .neighbors_directed(*node, petgraph::Direction::Outgoing)
                .map(|n| self.index_to_name[&n].clone())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::Job;

    fn make_workflow(jobs: Vec<(&str, Vec<&str>, Vec<&str>)>) -> Workflow {
        let mut wf = Workflow::new("test");
        for (name, inputs, outputs) in jobs {
            wf.add_job(
                Job::new(name)
                    .add_inputs(inputs)
                    .add_outputs(outputs, true, false),
            )
            .unwrap();
        }
        wf
    }

    #[test]
    fn test_producer_consumer_edge() {
        let wf = make_workflow(vec![
            ("produce", vec!["raw"], vec!["cooked"]),
            ("consume", vec!["cooked"], vec!["done"]),
        ]);

        let dag = DependencyGraph::build(&wf).unwrap();
        assert!(dag.has_edge("produce", "consume"));
        assert_eq!(dag.edge_count(), 1);
        assert_eq!(dag.producer("cooked"), Some("produce"));
    }

    #[test]
    fn test_linear_chain_order() {
        let wf = make_workflow(vec![
            ("a", vec![], vec!["x"]),
            ("b", vec!["x"], vec!["y"]),
            ("c", vec!["y"], vec![]),
        ]);

        let dag = DependencyGraph::build(&wf).unwrap();
        assert_eq!(dag.topological_order().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(dag.dependencies("c").unwrap(), vec!["b"]);
        assert_eq!(dag.dependents("a").unwrap(), vec!["b"]);
    }

    #[test]
    fn test_independent_jobs_yield_no_edges() {
        // The coconet shape: both jobs consume the shared dataset, neither
        // consumes the other's output
        let wf = make_workflow(vec![
            (
                "motion_module",
                vec!["dataset.tar.gz"],
                vec!["motion_output.tar.gz"],
            ),
            (
                "detection_module",
                vec!["dataset.tar.gz", "yolov3.cfg", "yolov3.weights"],
                vec!["detection_output.tar.gz"],
            ),
        ]);

        let dag = DependencyGraph::build(&wf).unwrap();
        assert_eq!(dag.edge_count(), 0);
        assert!(dag.dependencies("motion_module").unwrap().is_empty());
        assert!(dag.dependencies("detection_module").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_producer_detection() {
        let wf = make_workflow(vec![
            ("a", vec![], vec!["shared"]),
            ("b", vec![], vec!["shared"]),
        ]);

        let result = DependencyGraph::build(&wf);
        match result {
            Err(WfcatError::DuplicateProducer {
                artifact,
                first,
                second,
            }) => {
                assert_eq!(artifact, "shared");
                assert_eq!(first, "a");
                assert_eq!(second, "b");
            }
            _ => panic!("Expected DuplicateProducer"),
        }
    }

    #[test]
    fn test_cycle_detection() {
        let wf = make_workflow(vec![
            ("d", vec!["back"], vec!["forward"]),
            ("e", vec!["forward"], vec!["back"]),
        ]);

        let result = DependencyGraph::build(&wf);
        assert!(matches!(
            result,
            Err(WfcatError::CircularDependency { .. })
        ));
    }

    #[test]
    fn test_self_consumption_adds_no_edge() {
        // A job reading its own output must not depend on itself
        let wf = make_workflow(vec![("solo", vec!["state"], vec!["state"])]);

        let dag = DependencyGraph::build(&wf).unwrap();
        assert_eq!(dag.edge_count(), 0);
    }

    #[test]
    fn test_external_inputs_collected() {
        let wf = make_workflow(vec![("solo", vec!["dataset.tar.gz"], vec!["out"])]);

        let dag = DependencyGraph::build(&wf).unwrap();
        assert_eq!(
            dag.external_inputs(),
            &[("solo".to_string(), "dataset.tar.gz".to_string())]
        );
    }

    #[test]
    fn test_shared_artifacts_dedup_to_one_edge() {
        let wf = make_workflow(vec![
            ("a", vec![], vec!["x", "y"]),
            ("b", vec!["x", "y"], vec![]),
        ]);

        let dag = DependencyGraph::build(&wf).unwrap();
        assert_eq!(dag.edge_count(), 1);
    }
}
