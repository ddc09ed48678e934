pub mod classifier;
pub mod constants;

pub use classifier::TransactionClassifier;
