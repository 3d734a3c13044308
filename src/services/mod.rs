pub mod chart_service;
pub mod dataset_service;
pub mod prompt_service;
pub mod query_service;
pub mod response_parser;
pub mod translation_service;
