use super::tree::TreeTable;
use crate::errors::RandomTreeError;
use crate::node::Node;
use crate::Matrix;
use rayon::prelude::*;

impl TreeTable {
    /// Walk from row 0 to a leaf, returning the leaf's row and value.
    /// A split on a feature the point does not have is reported as a
    /// shape mismatch.
    fn find_leaf(&self, point: &[f64]) -> Result<(usize, f64), RandomTreeError> {
        let mut node_idx = 0;
        loop {
            let node = self.nodes().get(node_idx).ok_or_else(|| {
                RandomTreeError::InvalidTree(format!(
                    "row {} is outside the table of {} rows",
                    node_idx,
                    self.num_rows()
                ))
            })?;
            match node {
                Node::Leaf { value } => return Ok((node_idx, *value)),
                Node::Split { split_feature, .. } => {
                    let v = point.get(*split_feature).ok_or_else(|| {
                        RandomTreeError::ShapeMismatch(
                            "query point".to_string(),
                            format!("at least {} features", split_feature + 1),
                            point.len().to_string(),
                        )
                    })?;
                    node_idx = node.get_child_idx(node_idx, *v);
                }
            }
        }
    }

    /// Row index of the leaf `point` ends up in.
    pub fn predict_leaf_index(&self, point: &[f64]) -> Result<usize, RandomTreeError> {
        self.find_leaf(point).map(|(idx, _)| idx)
    }

    /// Predict a single point, the value of the leaf it reaches.
    pub fn predict_one(&self, point: &[f64]) -> Result<f64, RandomTreeError> {
        self.find_leaf(point).map(|(_, value)| value)
    }

    fn predict_single_threaded(&self, data: &Matrix<f64>) -> Result<Vec<f64>, RandomTreeError> {
        data.index.iter().map(|i| self.predict_one(&data.get_row(*i))).collect()
    }

    fn predict_parallel(&self, data: &Matrix<f64>) -> Result<Vec<f64>, RandomTreeError> {
        data.index
            .par_iter()
            .map(|i| self.predict_one(&data.get_row(*i)))
            .collect()
    }

    /// Predict every row of `data`, keeping the row order.
    ///
    /// * `data` - The query points, one per row.
    /// * `parallel` - Spread the rows over the rayon thread pool.
    pub fn predict_batch(&self, data: &Matrix<f64>, parallel: bool) -> Result<Vec<f64>, RandomTreeError> {
        if parallel {
            self.predict_parallel(data)
        } else {
            self.predict_single_threaded(data)
        }
    }

    /// Leaf row reached by every row of `data`.
    pub fn predict_leaf_indices(&self, data: &Matrix<f64>, parallel: bool) -> Result<Vec<usize>, RandomTreeError> {
        if parallel {
            data.index
                .par_iter()
                .map(|i| self.predict_leaf_index(&data.get_row(*i)))
                .collect()
        } else {
            data.index
                .iter()
                .map(|i| self.predict_leaf_index(&data.get_row(*i)))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::data::RowMajorMatrix;
    use crate::errors::RandomTreeError;
    use crate::tree::TreeTable;
    use crate::Matrix;

    // [f0 <= 2.5] -> ([f1 <= 0.5] -> 10 | 20) | 30
    fn small_tree() -> TreeTable {
        let nan = f64::NAN;
        let m = RowMajorMatrix::new(
            vec![
                0.0, 2.5, 1.0, 4.0, //
                1.0, 0.5, 1.0, 2.0, //
                -1.0, 10.0, nan, nan, //
                -1.0, 20.0, nan, nan, //
                -1.0, 30.0, nan, nan,
            ],
            5,
            4,
        );
        TreeTable::from_matrix(&m).unwrap()
    }

    #[test]
    fn test_predict_one() {
        let tree = small_tree();
        assert_eq!(tree.predict_one(&[1.0, 0.0]).unwrap(), 10.0);
        assert_eq!(tree.predict_one(&[2.5, 0.5]).unwrap(), 10.0);
        assert_eq!(tree.predict_one(&[2.0, 0.7]).unwrap(), 20.0);
        assert_eq!(tree.predict_one(&[2.6, 0.0]).unwrap(), 30.0);
        // NaN never compares <=, so it goes right.
        assert_eq!(tree.predict_one(&[f64::NAN, 0.0]).unwrap(), 30.0);
        assert_eq!(tree.predict_leaf_index(&[2.0, 0.7]).unwrap(), 3);
    }

    #[test]
    fn test_predict_one_leaf_tree() {
        let tree = TreeTable::leaf(7.0);
        assert_eq!(tree.predict_one(&[]).unwrap(), 7.0);
        assert_eq!(tree.predict_one(&[1.0, 2.0, 3.0]).unwrap(), 7.0);
    }

    #[test]
    fn test_predict_short_point() {
        let tree = small_tree();
        // Feature 1 is only needed on the left branch.
        assert_eq!(tree.predict_one(&[3.0]).unwrap(), 30.0);
        assert!(matches!(
            tree.predict_one(&[1.0]),
            Err(RandomTreeError::ShapeMismatch(..))
        ));
    }

    #[test]
    fn test_predict_batch() {
        let tree = small_tree();
        // Column major: f0 then f1.
        let data_vec = vec![1.0, 2.0, 2.6, 9.0, 0.0, 0.7, 0.0, 1.0];
        let data = Matrix::new(&data_vec, 4, 2);
        let preds = tree.predict_batch(&data, false).unwrap();
        assert_eq!(preds, vec![10.0, 20.0, 30.0, 30.0]);
        let par_preds = tree.predict_batch(&data, true).unwrap();
        assert_eq!(preds, par_preds);
        assert_eq!(tree.predict_leaf_indices(&data, true).unwrap(), vec![2, 3, 4, 4]);
    }
}
