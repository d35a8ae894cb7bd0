//! Shared Application State
//!
//! This module defines the `AppState` struct holding the shared services,
//! and the in-memory registry of live interview sessions keyed by an
//! explicit session id.

use crate::config::Config;
use interview_core::{
    interviewer::Interviewer, session::InterviewSession, transcribe::Transcriber,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub sessions: SessionRegistry,
    pub interviewer: Arc<Interviewer>,
    pub transcriber: Option<Arc<dyn Transcriber>>,
    pub config: Arc<Config>,
}

/// In-memory store of live interviews.
///
/// Each session sits behind its own async mutex so a slow generation call
/// for one interview does not block the others; steps within one interview
/// are processed sequentially.
#[derive(Default)]
pub struct SessionRegistry {
    inner: Mutex<HashMap<Uuid, Arc<Mutex<InterviewSession>>>>,
}

impl SessionRegistry {
    /// Stores a new session and returns its freshly minted id.
    pub async fn create(&self, session: InterviewSession) -> Uuid {
        let id = Uuid::new_v4();
        self.inner
            .lock()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Looks up a session by id.
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<InterviewSession>>> {
        self.inner.lock().await.get(&id).cloned()
    }
}
