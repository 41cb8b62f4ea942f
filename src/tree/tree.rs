use crate::constants::{LEAF_FEATURE, TREE_TABLE_COLS};
use crate::data::RowMajorMatrix;
use crate::errors::RandomTreeError;
use crate::node::Node;
use std::fmt::{self, Display};

/// A binary tree stored as a flat table of rows in pre-order.
///
/// Row 0 is the root. A split row is followed by its whole left subtree
/// and then its whole right subtree, so its left offset is always 1 and
/// its right offset is one more than the size of the left subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeTable {
    nodes: Vec<Node>,
}

impl TreeTable {
    /// A table holding a single leaf.
    pub fn leaf(value: f64) -> Self {
        TreeTable {
            nodes: vec![Node::Leaf { value }],
        }
    }

    /// Wrap rows that are already laid out in pre-order.
    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        TreeTable { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn num_rows(&self) -> usize {
        self.nodes.len()
    }

    /// Append the rows of `other` after the rows of this table.
    ///
    /// Nothing is rewired, row 0 keeps routing through the original tree
    /// only, so the appended rows cannot be reached by a query.
    pub fn stack(&mut self, other: TreeTable) {
        self.nodes.extend(other.nodes);
    }

    /// Walk every row reachable from row 0, returning `(row, depth)` pairs
    /// in pre-order.
    fn walk(&self) -> Vec<(usize, usize)> {
        let mut visited = Vec::new();
        let mut stack = vec![(0, 0)];
        while let Some((row, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(row) else {
                continue;
            };
            visited.push((row, depth));
            if let Node::Split {
                left_offset,
                right_offset,
                ..
            } = node
            {
                stack.push((row + right_offset, depth + 1));
                stack.push((row + left_offset, depth + 1));
            }
        }
        visited
    }

    /// Number of rows a query can reach starting from row 0.
    pub fn reachable_rows(&self) -> usize {
        self.walk().len()
    }

    /// Depth of the tree rooted at row 0, a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.walk().iter().map(|(_, d)| *d).max().unwrap_or(0)
    }

    /// Number of leaves reachable from row 0.
    pub fn n_leaves(&self) -> usize {
        self.walk().iter().filter(|(r, _)| self.nodes[*r].is_leaf()).count()
    }

    /// Export the table as a flat numeric matrix with the columns
    /// feature index (-1 for leaves), split or leaf value, left offset
    /// and right offset (NaN for leaves).
    pub fn to_matrix(&self) -> RowMajorMatrix<f64> {
        let data = self.nodes.iter().flat_map(|n| n.as_row()).collect();
        RowMajorMatrix::new(data, self.nodes.len(), TREE_TABLE_COLS)
    }

    /// Read a table back from its flat numeric form, checking every row.
    pub fn from_matrix(matrix: &RowMajorMatrix<f64>) -> Result<Self, RandomTreeError> {
        if matrix.cols != TREE_TABLE_COLS {
            return Err(RandomTreeError::InvalidTree(format!(
                "expected {} columns, found {}",
                TREE_TABLE_COLS, matrix.cols
            )));
        }
        if matrix.rows == 0 {
            return Err(RandomTreeError::InvalidTree("the table has no rows".to_string()));
        }
        let mut nodes = Vec::with_capacity(matrix.rows);
        for r in 0..matrix.rows {
            let row = matrix.get_row(r);
            if row[0] == LEAF_FEATURE {
                nodes.push(Node::Leaf { value: row[1] });
                continue;
            }
            let split_feature = as_index(row[0])
                .ok_or_else(|| RandomTreeError::InvalidTree(format!("row {} has feature index {}", r, row[0])))?;
            let left_offset = as_offset(row[2], r, matrix.rows)?;
            let right_offset = as_offset(row[3], r, matrix.rows)?;
            nodes.push(Node::Split {
                split_feature,
                split_value: row[1],
                left_offset,
                right_offset,
            });
        }
        Ok(TreeTable { nodes })
    }

    /// Human readable listing of every row.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

fn as_index(v: f64) -> Option<usize> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 {
        Some(v as usize)
    } else {
        None
    }
}

fn as_offset(v: f64, row: usize, rows: usize) -> Result<usize, RandomTreeError> {
    match as_index(v) {
        Some(o) if o >= 1 && row.checked_add(o).is_some_and(|t| t < rows) => Ok(o),
        _ => Err(RandomTreeError::InvalidTree(format!(
            "row {} has offset {}, which does not point to a later row of the {} row table",
            row, v, rows
        ))),
    }
}

impl Display for TreeTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut r = format!("{:>6} {:>7} {:>12} {:>6} {:>6}\n", "node", "factor", "split_val", "left", "right");
        for (i, node) in self.nodes.iter().enumerate() {
            let row = node.as_row();
            r += format!(
                "{:>6} {:>7} {:>12} {:>6} {:>6}\n",
                i, row[0], row[1], row[2], row[3]
            )
            .as_str();
        }
        write!(f, "{}", r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0: [0 <= 2.5]
    // 1:   [1 <= 0.5]
    // 2:     leaf 10
    // 3:     leaf 20
    // 4:   leaf 30
    fn small_tree() -> TreeTable {
        TreeTable::from_nodes(vec![
            Node::Split {
                split_feature: 0,
                split_value: 2.5,
                left_offset: 1,
                right_offset: 4,
            },
            Node::Split {
                split_feature: 1,
                split_value: 0.5,
                left_offset: 1,
                right_offset: 2,
            },
            Node::Leaf { value: 10.0 },
            Node::Leaf { value: 20.0 },
            Node::Leaf { value: 30.0 },
        ])
    }

    #[test]
    fn test_tree_stats() {
        let tree = small_tree();
        assert_eq!(tree.num_rows(), 5);
        assert_eq!(tree.reachable_rows(), 5);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.n_leaves(), 3);

        let leaf = TreeTable::leaf(4.0);
        assert_eq!(leaf.num_rows(), 1);
        assert_eq!(leaf.depth(), 0);
        assert_eq!(leaf.n_leaves(), 1);
    }

    #[test]
    fn test_tree_stack() {
        let mut tree = small_tree();
        tree.stack(TreeTable::leaf(1.0));
        tree.stack(small_tree());
        assert_eq!(tree.num_rows(), 11);
        assert_eq!(tree.reachable_rows(), 5);
        assert_eq!(tree.nodes()[5], Node::Leaf { value: 1.0 });
        assert_eq!(tree.nodes()[6], small_tree().nodes()[0]);
    }

    #[test]
    fn test_tree_matrix() {
        let tree = small_tree();
        let m = tree.to_matrix();
        assert_eq!(m.rows, 5);
        assert_eq!(m.cols, 4);
        assert_eq!(m.get_row(0), &[0.0, 2.5, 1.0, 4.0]);
        assert_eq!(*m.get(4, 0), -1.0);
        assert_eq!(*m.get(4, 1), 30.0);
        assert!(m.get(4, 2).is_nan());

        let tree2 = TreeTable::from_matrix(&m).unwrap();
        assert_eq!(tree, tree2);
    }

    #[test]
    fn test_tree_from_matrix_invalid() {
        let bad_cols = RowMajorMatrix::new(vec![-1.0, 3.0, f64::NAN], 1, 3);
        assert!(matches!(
            TreeTable::from_matrix(&bad_cols),
            Err(RandomTreeError::InvalidTree(_))
        ));

        let empty = RowMajorMatrix::new(Vec::new(), 0, 4);
        assert!(TreeTable::from_matrix(&empty).is_err());

        // Right offset points past the end of the table.
        let out_of_range = RowMajorMatrix::new(
            vec![0.0, 1.0, 1.0, 3.0, -1.0, 2.0, f64::NAN, f64::NAN, -1.0, 3.0, f64::NAN, f64::NAN],
            3,
            4,
        );
        assert!(TreeTable::from_matrix(&out_of_range).is_err());

        let fractional_feature = RowMajorMatrix::new(
            vec![0.5, 1.0, 1.0, 2.0, -1.0, 2.0, f64::NAN, f64::NAN, -1.0, 3.0, f64::NAN, f64::NAN],
            3,
            4,
        );
        assert!(TreeTable::from_matrix(&fractional_feature).is_err());

        let zero_offset = RowMajorMatrix::new(
            vec![0.0, 1.0, 0.0, 2.0, -1.0, 2.0, f64::NAN, f64::NAN, -1.0, 3.0, f64::NAN, f64::NAN],
            3,
            4,
        );
        assert!(TreeTable::from_matrix(&zero_offset).is_err());

        // An offset far beyond any table size, on a row past the root.
        let huge_offset = RowMajorMatrix::new(
            vec![-1.0, 1.0, f64::NAN, f64::NAN, 0.0, 0.5, 1.0, 1e300, -1.0, 2.0, f64::NAN, f64::NAN],
            3,
            4,
        );
        assert!(matches!(
            TreeTable::from_matrix(&huge_offset),
            Err(RandomTreeError::InvalidTree(_))
        ));
        let huge_right = RowMajorMatrix::new(
            vec![0.0, 0.5, 1.0, 2.0, 0.0, 0.1, 1.0, 1e300, -1.0, 2.0, f64::NAN, f64::NAN],
            3,
            4,
        );
        assert!(matches!(
            TreeTable::from_matrix(&huge_right),
            Err(RandomTreeError::InvalidTree(_))
        ));
    }

    #[test]
    fn test_tree_describe() {
        let tree = small_tree();
        let s = tree.describe();
        println!("{}", s);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("factor"));
        assert!(lines[0].contains("split_val"));
        assert!(lines[5].contains("30"));
        assert!(lines[5].contains("NaN"));
    }
}
