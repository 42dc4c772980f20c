//! Subcommand implementations for the `lchc` binary.

pub mod predict;
pub mod serve;
pub mod train;

pub use predict::PredictCommand;
pub use serve::ServeCommand;
pub use train::TrainCommand;
