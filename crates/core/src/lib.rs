pub mod difficulty;
pub mod generator;
pub mod interviewer;
pub mod prompts;
pub mod session;
pub mod transcribe;
