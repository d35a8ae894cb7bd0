//! Interview Session State Machine
//!
//! This module tracks the state of a single mock interview: the role being
//! interviewed for, the ordered topic list, the per-phase question quotas,
//! and the append-only question/answer history. It maps a caller-supplied
//! step index onto the interview phases (welcome, communication check,
//! topic questions, conclusion) and selects the topic and difficulty for
//! each topic-question step.

use serde::{Deserialize, Serialize};

use crate::difficulty::{Difficulty, DifficultyPicker};

/// Number of questions asked on each configured topic.
pub const DEFAULT_QUESTIONS_PER_TOPIC: usize = 2;
/// Number of free-form rapport questions asked before topic questions begin.
pub const DEFAULT_COMMUNICATION_QUOTA: usize = 2;

/// Errors produced by step validation and topic selection.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// The caller skipped, repeated, or otherwise supplied a step index
    /// that does not match the session's progress.
    #[error("step {got} is out of sequence; expected step {expected}")]
    StepOutOfSequence { expected: usize, got: usize },
    /// The computed topic index fell outside the configured topic list.
    #[error("step {step} selects topic index {index}, but only {topics} topics are configured")]
    TopicIndexOutOfRange {
        step: usize,
        index: usize,
        topics: usize,
    },
}

/// The phase a given interview step belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Step 0: one open-ended background question, no prior context.
    Welcome,
    /// Rapport questions grounded in the candidate's previous answer.
    Communication,
    /// A question bound to a specific topic at a chosen difficulty.
    TopicQuestion {
        topic: String,
        difficulty: Difficulty,
    },
    /// Closing performance summary; no further question is asked.
    Conclusion,
}

/// The most recently completed question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

/// State of one interview, owned by the session registry for its lifetime.
///
/// History is append-only: questions and answers advance in lockstep except
/// for step 0, which has no prior answer to record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub role: String,
    pub topics: Vec<String>,
    questions_per_topic: usize,
    communication_quota: usize,
    asked_questions: Vec<String>,
    given_answers: Vec<String>,
}

impl InterviewSession {
    /// Creates a new session with the default quotas.
    pub fn new(role: String, topics: Vec<String>) -> Self {
        Self {
            role,
            topics,
            questions_per_topic: DEFAULT_QUESTIONS_PER_TOPIC,
            communication_quota: DEFAULT_COMMUNICATION_QUOTA,
            asked_questions: Vec::new(),
            given_answers: Vec::new(),
        }
    }

    /// Overrides the per-topic and communication quotas.
    ///
    /// `questions_per_topic` must be at least 1; topic selection divides by it.
    pub fn with_quotas(mut self, questions_per_topic: usize, communication_quota: usize) -> Self {
        debug_assert!(questions_per_topic >= 1);
        self.questions_per_topic = questions_per_topic;
        self.communication_quota = communication_quota;
        self
    }

    /// Total number of generation steps that produce a question:
    /// `questions_per_topic * topic_count + communication_quota + 1`.
    pub fn total_questions(&self) -> usize {
        self.questions_per_topic * self.topics.len() + self.communication_quota + 1
    }

    /// The step index the caller must supply next.
    ///
    /// Derived from history: every processed step except step 0 appended an
    /// answer, so the count of answers identifies the last processed step.
    pub fn expected_step(&self) -> usize {
        if self.asked_questions.is_empty() && self.given_answers.is_empty() {
            0
        } else {
            self.given_answers.len() + 1
        }
    }

    /// Computes the phase for a step index without touching history.
    ///
    /// Topic selection for `communication_quota < step < total_questions` is
    /// `(step - communication_quota - 1) / questions_per_topic`; an index
    /// outside the topic list is a reported error, never an out-of-range
    /// access.
    pub fn phase_for_step(
        &self,
        step: usize,
        picker: &dyn DifficultyPicker,
    ) -> Result<Phase, SessionError> {
        if step == 0 {
            return Ok(Phase::Welcome);
        }
        if step <= self.communication_quota {
            return Ok(Phase::Communication);
        }
        if step < self.total_questions() {
            let index = (step - self.communication_quota - 1) / self.questions_per_topic;
            let topic = self.topics.get(index).cloned().ok_or_else(|| {
                SessionError::TopicIndexOutOfRange {
                    step,
                    index,
                    topics: self.topics.len(),
                }
            })?;
            return Ok(Phase::TopicQuestion {
                topic,
                difficulty: picker.pick(),
            });
        }
        Ok(Phase::Conclusion)
    }

    /// Validates the caller's step index and folds their answer into history.
    ///
    /// Every step except step 0 records the supplied answer before the next
    /// prompt is computed; step 0 records nothing since no question has been
    /// asked yet.
    pub fn begin_step(
        &mut self,
        step: usize,
        answer: &str,
        picker: &dyn DifficultyPicker,
    ) -> Result<Phase, SessionError> {
        let expected = self.expected_step();
        if step != expected {
            return Err(SessionError::StepOutOfSequence {
                expected,
                got: step,
            });
        }
        let phase = self.phase_for_step(step, picker)?;
        if step > 0 {
            self.given_answers.push(answer.to_string());
        }
        Ok(phase)
    }

    /// Appends a generated question to history.
    pub fn record_question(&mut self, question: &str) {
        self.asked_questions.push(question.to_string());
    }

    /// Returns the most recently asked question and its matching answer, or
    /// `None` when no question has been asked yet.
    pub fn prior_exchange(&self) -> Option<Exchange> {
        match (self.asked_questions.last(), self.given_answers.last()) {
            (Some(question), Some(answer)) => Some(Exchange {
                question: question.clone(),
                answer: answer.clone(),
            }),
            _ => None,
        }
    }

    pub fn asked_questions(&self) -> &[String] {
        &self.asked_questions
    }

    pub fn given_answers(&self) -> &[String] {
        &self.given_answers
    }
}
