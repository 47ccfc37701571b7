//! Release policy: whether a change set is worth releasing and by how much

pub mod bump_selector;
pub mod change_classifier;
pub mod rules;

pub use bump_selector::detect_bump_type;
pub use change_classifier::ChangeClassifier;
