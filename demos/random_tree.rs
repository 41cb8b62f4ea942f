//! Random Tree Learner
//! ===================
//! Fits a random tree on a small regression dataset, copies it into a
//! second learner, queries it, and fits another dataset holding
//! duplicate rows.
//!
//! ```bash
//! cargo run --release --example random_tree
//! ```

use random_tree::data::RowMajorMatrix;
use random_tree::{Matrix, RandomTreeLearner, TreeTable};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("This is a Random Tree Learner\n");

    // Column major: x0, then x1, then x2.
    let x0 = [0.885, 0.725, 0.560, 0.735, 0.610, 0.260, 0.500, 0.320];
    let x1 = [0.330, 0.390, 0.500, 0.570, 0.630, 0.630, 0.680, 0.780];
    let x2 = [9.100, 10.900, 9.400, 9.800, 8.400, 11.800, 10.500, 10.000];
    let x: Vec<f64> = x0.iter().chain(x1.iter()).chain(x2.iter()).copied().collect();
    let y = vec![4.0, 5.0, 6.0, 5.0, 3.0, 8.0, 7.0, 6.0];
    let data = Matrix::new(&x, y.len(), 3);

    let mut rtl = RandomTreeLearner::new(1, None)?;
    rtl.fit(&data, &y)?;
    println!("Fitted tree:\n{}", rtl.describe());

    println!("Create another tree learner from an existing tree");
    let rtl2 = RandomTreeLearner::new(1, rtl.tree())?;
    assert_eq!(rtl.tree(), rtl2.tree());

    // Overwrite the first row of an exported copy, the original is untouched.
    let mut table: RowMajorMatrix<f64> = rtl.tree().ok_or("rtl has no tree")?.to_matrix();
    table.data[..4].copy_from_slice(&[0.0, 1.0, 2.0, 3.0]);
    let edited = TreeTable::from_matrix(&table)?;
    assert_ne!(rtl.tree(), Some(&edited));

    let queries = [1.0, 0.2, 2.0, 12.0, 3.0, 12.0];
    let query_data = Matrix::new(&queries, 2, 3);
    println!("Predictions: {:?}\n", rtl.predict(&query_data)?);

    println!("Another dataset, with duplicate rows");
    let rows = [
        [0.26, 0.63, 11.8],
        [0.26, 0.63, 11.8],
        [0.32, 0.78, 10.0],
        [0.32, 0.78, 10.0],
        [0.32, 0.78, 10.0],
        [0.735, 0.57, 9.8],
        [0.26, 0.63, 11.8],
        [0.61, 0.63, 8.4],
    ];
    let x: Vec<f64> = (0..3).flat_map(|j| rows.iter().map(move |r| r[j])).collect();
    let y = vec![8.0, 8.0, 6.0, 6.0, 6.0, 5.0, 8.0, 3.0];
    let data = Matrix::new(&x, y.len(), 3);
    let mut rtl3 = RandomTreeLearner::default();
    rtl3.fit(&data, &y)?;
    println!("{}", rtl3.describe());
    println!("Predictions: {:?}", rtl3.predict(&data)?);

    Ok(())
}
