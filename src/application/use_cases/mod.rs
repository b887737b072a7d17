pub mod analytics_engine;
pub mod content_features;
pub mod dataset_analysis;
pub mod date_resolver;
pub mod hashtag_analysis;
pub mod keyword_cloud;
pub mod pareto_analysis;
pub mod posting_schedule;
pub mod row_normalizer;
