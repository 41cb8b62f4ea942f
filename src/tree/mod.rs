pub mod predict;
#[allow(clippy::module_inception)]
pub mod tree;

pub use tree::TreeTable;
