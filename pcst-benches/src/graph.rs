//! Seeded synthetic graph instances for benchmarking.
//!
//! Provides [`SyntheticInstance`], a connected random graph with prizes.
//! Instances are seeded so runs stay comparable across machines.

use pcst_core::{EdgeListGraph, PcstError};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur during synthetic instance generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum SyntheticError {
    /// The requested node count was zero.
    #[error("node count must be greater than zero")]
    ZeroNodes,
    /// A float parameter was non-finite or not positive.
    #[error("`{parameter}` must be finite and greater than zero")]
    InvalidFloatParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
    },
    /// `prized_one_in` was zero.
    #[error("`prized_one_in` must be greater than zero")]
    ZeroPrizeRatio,
    /// The generated edge list was rejected by the graph builder.
    #[error(transparent)]
    Graph(#[from] PcstError),
}

/// Shape of a synthetic instance.
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Random edges added per node on top of the spanning tree.
    pub extra_edges_per_node: usize,
    /// Upper bound (exclusive) of the uniform edge cost.
    pub max_cost: f64,
    /// Upper bound (exclusive) of the uniform prize of a prized node.
    pub max_prize: f64,
    /// One node in `prized_one_in` carries a prize; the rest carry zero.
    pub prized_one_in: u32,
    /// RNG seed.
    pub seed: u64,
}

/// A generated graph together with one prize per node.
#[derive(Clone, Debug)]
pub struct SyntheticInstance {
    /// Connected undirected graph.
    pub graph: EdgeListGraph,
    /// Prize of every node, indexed by node id.
    pub prizes: Vec<f64>,
}

impl SyntheticInstance {
    /// Generates a connected instance: a random recursive spanning tree plus
    /// `extra_edges_per_node * node_count` uniformly random edges, which may
    /// include self-loops and parallel edges.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    ///
    /// # Examples
    /// ```
    /// use pcst_benches::graph::{SyntheticGraphConfig, SyntheticInstance};
    /// use pcst_core::WeightedGraph;
    ///
    /// let instance = SyntheticInstance::generate(&SyntheticGraphConfig {
    ///     node_count: 50,
    ///     extra_edges_per_node: 2,
    ///     max_cost: 10.0,
    ///     max_prize: 30.0,
    ///     prized_one_in: 4,
    ///     seed: 7,
    /// })?;
    /// assert_eq!(instance.graph.node_count(), 50);
    /// assert_eq!(instance.prizes.len(), 50);
    /// # Ok::<(), pcst_benches::graph::SyntheticError>(())
    /// ```
    pub fn generate(config: &SyntheticGraphConfig) -> Result<Self, SyntheticError> {
        validate(config)?;
        let node_count = config.node_count;
        let mut rng = SmallRng::seed_from_u64(config.seed);

        let extra = node_count.saturating_mul(config.extra_edges_per_node);
        let mut edges = Vec::with_capacity(extra.saturating_add(node_count));
        for node in 1..node_count {
            let parent = rng.gen_range(0..node);
            edges.push((parent, node, rng.gen_range(0.0..config.max_cost)));
        }
        for _ in 0..extra {
            let source = rng.gen_range(0..node_count);
            let target = rng.gen_range(0..node_count);
            edges.push((source, target, rng.gen_range(0.0..config.max_cost)));
        }

        let prizes = (0..node_count)
            .map(|_| {
                if rng.gen_ratio(1, config.prized_one_in) {
                    rng.gen_range(0.0..config.max_prize)
                } else {
                    0.0
                }
            })
            .collect();

        Ok(Self {
            graph: EdgeListGraph::try_new(node_count, edges)?,
            prizes,
        })
    }
}

fn validate(config: &SyntheticGraphConfig) -> Result<(), SyntheticError> {
    if config.node_count == 0 {
        return Err(SyntheticError::ZeroNodes);
    }
    if config.prized_one_in == 0 {
        return Err(SyntheticError::ZeroPrizeRatio);
    }
    for (parameter, value) in [
        ("max_cost", config.max_cost),
        ("max_prize", config.max_prize),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(SyntheticError::InvalidFloatParameter { parameter });
        }
    }
    Ok(())
}
