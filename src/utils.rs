use crate::errors::RandomTreeError;
use hashbrown::HashMap;

// Validation
pub fn validate_leaf_size(leaf_size: usize) -> Result<(), RandomTreeError> {
    if leaf_size < 1 {
        Err(RandomTreeError::InvalidConfig(
            "leaf_size".to_string(),
            "an integer greater than or equal to 1".to_string(),
            leaf_size.to_string(),
        ))
    } else {
        Ok(())
    }
}

pub fn validate_shape(what: &str, expected: usize, provided: usize) -> Result<(), RandomTreeError> {
    if expected != provided {
        Err(RandomTreeError::ShapeMismatch(
            what.to_string(),
            expected.to_string(),
            provided.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Key used to compare targets by value, with `-0.0` and `0.0`
/// sharing a key and all NaNs sharing another.
#[inline]
fn value_key(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0.0_f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// Most frequent of the selected values. Ties go to the value
/// encountered first, an empty selection gives NaN.
///
/// * `y` - The values to select from.
/// * `index` - The positions of `y` to count.
pub fn mode(y: &[f64], index: &[usize]) -> f64 {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    // Distinct values in first-seen order, with their key.
    let mut seen: Vec<(u64, f64)> = Vec::new();
    for i in index {
        let v = y[*i];
        let k = value_key(v);
        let c = counts.entry(k).or_insert(0);
        if *c == 0 {
            seen.push((k, v));
        }
        *c += 1;
    }
    let mut best = f64::NAN;
    let mut best_count = 0;
    for (k, v) in seen {
        let c = counts[&k];
        if c > best_count {
            best = v;
            best_count = c;
        }
    }
    best
}

/// Check if every selected value is the same.
pub fn all_equal(y: &[f64], index: &[usize]) -> bool {
    match index.first() {
        None => true,
        Some(first) => {
            let k = value_key(y[*first]);
            index.iter().all(|i| value_key(y[*i]) == k)
        }
    }
}

/// Split an index into the rows whose feature value is `<=` the
/// split value, and all the others. Both sides keep the relative
/// order they had in `index`.
///
/// * `index` - The rows to partition.
/// * `feature` - The full column of the feature to split on.
/// * `split_value` - The value to pivot on.
pub fn partition_on_split(index: &[usize], feature: &[f64], split_value: f64) -> (Vec<usize>, Vec<usize>) {
    index.iter().partition(|i| feature[**i] <= split_value)
}
