pub mod grading_service;
pub mod playlist_builder;
pub mod prompts;
pub mod response_extractor;

pub use grading_service::GradingService;
pub use playlist_builder::build_playlist;
pub use response_extractor::{extract_json_payload, parse_verdict, strip_reasoning};
