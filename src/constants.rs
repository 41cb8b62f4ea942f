/// Feature index stored in the exported table for leaf rows.
pub const LEAF_FEATURE: f64 = -1.0;
/// Columns of the exported table: feature, split or leaf value, left offset, right offset.
pub const TREE_TABLE_COLS: usize = 4;
pub const DEFAULT_LEAF_SIZE: usize = 1;
