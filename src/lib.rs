// Modules
pub mod builder;
pub mod config;
pub mod constants;
pub mod data;
pub mod errors;
pub mod learner;
pub mod node;
pub mod splitter;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use builder::{build, TreeBuilder};
pub use config::{ConfigIO, LearnerConfig};
pub use data::Matrix;
pub use errors::RandomTreeError;
pub use learner::RandomTreeLearner;
pub use tree::TreeTable;
