//! Splitter
//!
//! Split search for a single node. A splitter looks at the samples that
//! reached a node and either proposes a feature and split value that
//! separates them into two non-empty groups, or gives up so the node
//! becomes a leaf.
use crate::data::Matrix;
use crate::utils::partition_on_split;
use log::debug;
use rand::Rng;

/// An accepted split, and the samples routed to either side of it.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitInfo {
    pub split_feature: usize,
    pub split_value: f64,
    /// Rows with a feature value `<=` the split value.
    pub left_index: Vec<usize>,
    /// All the other rows.
    pub right_index: Vec<usize>,
}

impl SplitInfo {
    /// Partition `index` on a feature, returning `None` if every row
    /// lands on the same side.
    pub fn try_new(data: &Matrix<f64>, index: &[usize], split_feature: usize, split_value: f64) -> Option<Self> {
        let (left_index, right_index) = partition_on_split(index, data.get_col(split_feature), split_value);
        if left_index.is_empty() || right_index.is_empty() {
            None
        } else {
            Some(SplitInfo {
                split_feature,
                split_value,
                left_index,
                right_index,
            })
        }
    }
}

pub trait Splitter {
    /// Find a split for the samples in `index`.
    ///
    /// * `rng` - Source of randomness for the search.
    /// * `data` - The full training matrix.
    /// * `index` - The rows of `data` that reached this node.
    fn split_node<R: Rng + ?Sized>(&self, rng: &mut R, data: &Matrix<f64>, index: &[usize]) -> Option<SplitInfo>;
}

/// Splits on a randomly chosen feature, at the mean of that feature's
/// values for two randomly chosen samples.
///
/// Features that produce a degenerate split are dropped from the
/// candidate pool and another one is drawn, until the pool is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSplitter;

impl RandomSplitter {
    pub fn new() -> Self {
        RandomSplitter
    }

    /// Draw two sample positions in `0..n`, redrawing the pair until they
    /// differ when there is more than one sample.
    fn draw_row_pair<R: Rng + ?Sized>(rng: &mut R, n: usize) -> (usize, usize) {
        let mut a = rng.gen_range(0..n);
        let mut b = rng.gen_range(0..n);
        while a == b && n > 1 {
            a = rng.gen_range(0..n);
            b = rng.gen_range(0..n);
        }
        (a, b)
    }
}

impl Splitter for RandomSplitter {
    fn split_node<R: Rng + ?Sized>(&self, rng: &mut R, data: &Matrix<f64>, index: &[usize]) -> Option<SplitInfo> {
        if index.is_empty() {
            return None;
        }
        let mut candidates: Vec<usize> = (0..data.cols).collect();
        while !candidates.is_empty() {
            let pos = rng.gen_range(0..candidates.len());
            let feature = candidates[pos];
            let (a, b) = Self::draw_row_pair(rng, index.len());
            let split_value = (data.get(index[a], feature) + data.get(index[b], feature)) / 2.0;
            if let Some(info) = SplitInfo::try_new(data, index, feature, split_value) {
                return Some(info);
            }
            candidates.remove(pos);
        }
        debug!(
            "No feature separates the {} samples at this node, making it a leaf.",
            index.len()
        );
        None
    }
}
