pub mod chat;
pub mod interview_mix;
pub mod loaders;
pub mod question;
pub mod transcript;
pub mod verdict;

pub use chat::{ChatMessage, ChatRole};
pub use interview_mix::{InterviewMix, InterviewMixFile};
pub use loaders::{load_interview_mix, load_question_bank};
pub use question::{Difficulty, Playlist, Question, QuestionBank, QuestionRecord};
pub use transcript::{Role, Transcript, Turn};
pub use verdict::{ParsedVerdict, Verdict};
