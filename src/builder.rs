//! Builder
//!
//! Recursive construction of a [`TreeTable`] from a training set. Each
//! node either terminates as a leaf holding the mode of its targets, or
//! asks its [`Splitter`] for a split and recurses into both sides.
use crate::data::Matrix;
use crate::errors::RandomTreeError;
use crate::node::Node;
use crate::splitter::{RandomSplitter, Splitter};
use crate::tree::TreeTable;
use crate::utils::{all_equal, mode, validate_leaf_size, validate_shape};
use rand::Rng;

pub struct TreeBuilder<S: Splitter = RandomSplitter> {
    leaf_size: usize,
    splitter: S,
}

impl TreeBuilder<RandomSplitter> {
    /// Builder using random feature and split selection.
    ///
    /// * `leaf_size` - A node with this many samples or fewer becomes a leaf.
    pub fn new(leaf_size: usize) -> Result<Self, RandomTreeError> {
        Self::with_splitter(leaf_size, RandomSplitter::new())
    }
}

impl<S: Splitter> TreeBuilder<S> {
    pub fn with_splitter(leaf_size: usize, splitter: S) -> Result<Self, RandomTreeError> {
        validate_leaf_size(leaf_size)?;
        Ok(TreeBuilder { leaf_size, splitter })
    }

    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// Build a tree from the rows of `data` and their targets `y`.
    ///
    /// * `data` - Training features, one row per sample.
    /// * `y` - One target per row of `data`.
    /// * `rng` - Source of randomness handed to the splitter.
    pub fn build<R: Rng + ?Sized>(
        &self,
        data: &Matrix<f64>,
        y: &[f64],
        rng: &mut R,
    ) -> Result<TreeTable, RandomTreeError> {
        let n_values = data.rows.checked_mul(data.cols).unwrap_or(usize::MAX);
        if data.data.len() < n_values {
            return Err(RandomTreeError::ShapeMismatch(
                "length of data".to_string(),
                format!("at least {} values for {} rows and {} columns", n_values, data.rows, data.cols),
                data.data.len().to_string(),
            ));
        }
        validate_shape("length of y", data.rows, y.len())?;
        let mut nodes = Vec::new();
        self.grow(rng, data, y, &data.index, &mut nodes);
        Ok(TreeTable::from_nodes(nodes))
    }

    /// Append the subtree for the samples in `index` to `nodes`, in pre-order.
    fn grow<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        data: &Matrix<f64>,
        y: &[f64],
        index: &[usize],
        nodes: &mut Vec<Node>,
    ) {
        if index.len() <= self.leaf_size || all_equal(y, index) {
            nodes.push(Node::Leaf { value: mode(y, index) });
            return;
        }
        let Some(info) = self.splitter.split_node(rng, data, index) else {
            nodes.push(Node::Leaf { value: mode(y, index) });
            return;
        };

        let root = nodes.len();
        // The right offset is known once the left subtree is laid out.
        nodes.push(Node::Split {
            split_feature: info.split_feature,
            split_value: info.split_value,
            left_offset: 1,
            right_offset: 0,
        });
        self.grow(rng, data, y, &info.left_index, nodes);
        let left_rows = nodes.len() - root - 1;
        if let Node::Split { right_offset, .. } = &mut nodes[root] {
            *right_offset = left_rows + 1;
        }
        self.grow(rng, data, y, &info.right_index, nodes);
    }
}

/// Build a tree with a [`RandomSplitter`].
///
/// * `data` - Training features, one row per sample.
/// * `y` - One target per row of `data`.
/// * `leaf_size` - A node with this many samples or fewer becomes a leaf.
/// * `rng` - Source of randomness for the split search.
pub fn build<R: Rng + ?Sized>(
    data: &Matrix<f64>,
    y: &[f64],
    leaf_size: usize,
    rng: &mut R,
) -> Result<TreeTable, RandomTreeError> {
    TreeBuilder::new(leaf_size)?.build(data, y, rng)
}
