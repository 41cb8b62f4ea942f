use crate::builder::TreeBuilder;
use crate::config::LearnerConfig;
use crate::constants::TREE_TABLE_COLS;
use crate::data::Matrix;
use crate::errors::RandomTreeError;
use crate::tree::TreeTable;
use crate::utils::{validate_leaf_size, validate_shape};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Random Tree Learner object
///
/// Owns at most one tree table. `fit` builds a tree with random splits,
/// `predict` walks it from row 0 for every query point.
#[derive(Clone, Debug)]
pub struct RandomTreeLearner {
    pub config: LearnerConfig,
    tree: Option<TreeTable>,
    // Number of features the current root tree was fitted on, unknown
    // for a tree handed over at construction.
    n_features: Option<usize>,
}

impl Default for RandomTreeLearner {
    fn default() -> Self {
        RandomTreeLearner {
            config: LearnerConfig::default(),
            tree: None,
            n_features: None,
        }
    }
}

impl RandomTreeLearner {
    /// Random Tree Learner object
    ///
    /// * `leaf_size` - The maximum number of samples aggregated into a leaf.
    /// * `tree` - An existing tree to start from. It is copied, so later
    ///   changes to either tree never reach the other.
    pub fn new(leaf_size: usize, tree: Option<&TreeTable>) -> Result<Self, RandomTreeError> {
        let config = LearnerConfig {
            leaf_size,
            ..LearnerConfig::default()
        };
        Self::from_config(config, tree)
    }

    /// Create a learner from a full configuration.
    pub fn from_config(config: LearnerConfig, tree: Option<&TreeTable>) -> Result<Self, RandomTreeError> {
        let learner = RandomTreeLearner {
            config,
            tree: tree.cloned(),
            n_features: None,
        };
        learner.validate_parameters()?;
        if learner.config.verbose {
            learner.get_learner_info();
        }
        Ok(learner)
    }

    pub fn validate_parameters(&self) -> Result<(), RandomTreeError> {
        validate_leaf_size(self.config.leaf_size)
    }

    /// Get reference to the tree, if there is one.
    pub fn tree(&self) -> Option<&TreeTable> {
        self.tree.as_ref()
    }

    /// Drop the current tree.
    pub fn reset(&mut self) {
        self.tree = None;
        self.n_features = None;
    }

    /// Fit a tree on the provided dataset, seeding the split search from
    /// the configured seed, or from entropy when there is none.
    ///
    /// * `data` - Training features, one row per sample.
    /// * `y` - One target per row of `data`.
    pub fn fit(&mut self, data: &Matrix<f64>, y: &[f64]) -> Result<(), RandomTreeError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.fit_with_rng(data, y, &mut rng)
    }

    /// Fit a tree on the provided dataset with a caller supplied random source.
    ///
    /// If the learner already holds a tree and `reset` is off, the new
    /// table is stacked under the existing one. Queries still start at the
    /// original root, so the appended rows are never used for prediction.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &mut self,
        data: &Matrix<f64>,
        y: &[f64],
        rng: &mut R,
    ) -> Result<(), RandomTreeError> {
        let start = Instant::now();
        let new_tree = TreeBuilder::new(self.config.leaf_size)?.build(data, y, rng)?;

        match self.tree.as_mut() {
            Some(tree) if !self.config.reset => {
                warn!(
                    "Appending {} rows to an existing tree of {} rows, queries start at the original root and will not reach them.",
                    new_tree.num_rows(),
                    tree.num_rows()
                );
                tree.stack(new_tree);
            }
            _ => {
                self.tree = Some(new_tree);
                self.n_features = Some(data.cols);
            }
        }

        if self.config.verbose {
            if let Some(tree) = &self.tree {
                info!(
                    "Fitted on {} samples in {:.3}s, tree.rows: {}, tree.depth: {}, tree.leaves: {}",
                    data.rows,
                    start.elapsed().as_secs_f32(),
                    tree.num_rows(),
                    tree.depth(),
                    tree.n_leaves()
                );
            }
            self.get_learner_info();
        }
        Ok(())
    }

    /// Generate predictions for every row of `data`, in row order.
    ///
    /// * `data` - The query points, one per row.
    pub fn predict(&self, data: &Matrix<f64>) -> Result<Vec<f64>, RandomTreeError> {
        let tree = self.tree.as_ref().ok_or(RandomTreeError::UnfittedModel)?;
        if let Some(n_features) = self.n_features {
            validate_shape("number of columns in data", n_features, data.cols)?;
        }
        tree.predict_batch(data, self.config.parallel)
    }

    /// Predict a single point.
    pub fn predict_one(&self, point: &[f64]) -> Result<f64, RandomTreeError> {
        let tree = self.tree.as_ref().ok_or(RandomTreeError::UnfittedModel)?;
        if let Some(n_features) = self.n_features {
            validate_shape("length of point", n_features, point.len())?;
        }
        tree.predict_one(point)
    }

    /// Human readable dump of the learner's tree.
    pub fn describe(&self) -> String {
        match &self.tree {
            Some(tree) => tree.describe(),
            None => "Tree has no data".to_string(),
        }
    }

    /// Log the learner parameters and its tree.
    pub fn get_learner_info(&self) {
        info!("leaf_size = {}", self.config.leaf_size);
        match &self.tree {
            Some(tree) => {
                info!(
                    "tree shape = ({}, {}), {} rows reachable from the root",
                    tree.num_rows(),
                    TREE_TABLE_COLS,
                    tree.reachable_rows()
                );
                info!("tree as a matrix:\n{}", tree);
            }
            None => info!("Tree has no data"),
        }
    }

    // Set methods for parameters

    /// Set the leaf size on the learner.
    /// * `leaf_size` - Maximum number of samples aggregated into a leaf.
    pub fn set_leaf_size(mut self, leaf_size: usize) -> Self {
        self.config.leaf_size = leaf_size;
        self
    }

    /// Set the seed on the learner.
    /// * `seed` - Integer value used to seed the split search, `None` for entropy.
    pub fn set_seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the verbosity of the learner.
    pub fn set_verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Set if predictions are made in parallel.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set if fit replaces the current tree, rather than appending to it.
    pub fn set_reset(mut self, reset: bool) -> Self {
        self.config.reset = reset;
        self
    }
}
