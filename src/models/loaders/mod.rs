pub mod json_loader;
pub mod toml_loader;

pub use json_loader::{load_question_bank, parse_question_bank};
pub use toml_loader::load_interview_mix;
