pub mod use_cases;

pub use use_cases::analytics_engine::AnalyticsEngine;
pub use use_cases::dataset_analysis::DatasetAnalysis;
pub use use_cases::date_resolver::DateResolver;
pub use use_cases::row_normalizer::RowNormalizer;
