use crate::constants::LEAF_FEATURE;
use std::fmt;

/// A single row of a tree table.
///
/// Offsets are row deltas relative to the row holding the node, so a
/// table can be cut or stacked without rewriting any of its rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node {
    Leaf {
        value: f64,
    },
    Split {
        split_feature: usize,
        split_value: f64,
        left_offset: usize,
        right_offset: usize,
    },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Get the row that should be traveled to, given the value of
    /// the split feature. Values that do not compare `<=` to the split,
    /// NaN included, go right.
    ///
    /// * `row` - Index of this node in its table.
    /// * `v` - The point's value for this node's split feature.
    pub fn get_child_idx(&self, row: usize, v: f64) -> usize {
        match *self {
            Node::Leaf { .. } => row,
            Node::Split {
                split_value,
                left_offset,
                right_offset,
                ..
            } => {
                if v <= split_value {
                    row + left_offset
                } else {
                    row + right_offset
                }
            }
        }
    }

    /// The four numeric columns of this row, with `-1` as the leaf
    /// feature and NaN for a leaf's missing offsets.
    pub fn as_row(&self) -> [f64; 4] {
        match *self {
            Node::Leaf { value } => [LEAF_FEATURE, value, f64::NAN, f64::NAN],
            Node::Split {
                split_feature,
                split_value,
                left_offset,
                right_offset,
            } => [
                split_feature as f64,
                split_value,
                left_offset as f64,
                right_offset as f64,
            ],
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Leaf { value } => write!(f, "leaf={}", value),
            Node::Split {
                split_feature,
                split_value,
                left_offset,
                right_offset,
            } => write!(
                f,
                "[{} <= {}] yes=+{},no=+{}",
                split_feature, split_value, left_offset, right_offset
            ),
        }
    }
}
