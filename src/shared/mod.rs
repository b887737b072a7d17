pub mod stats;
pub mod text_features;

pub use text_features::TextFeatures;
