pub mod generation_client;
pub mod prompt_builder;
pub mod quiz_service;
pub mod response_parser;
pub mod topic_normalizer;
