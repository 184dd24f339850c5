//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::backend::Backend;
use crate::api::error::ApiError;
use crate::core::operation::{Completion, Operation};
use crate::core::state::App;

/// A backend that replays canned results in order and records every call.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<Completion, ApiError>>>,
    pub calls: Mutex<Vec<Operation>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<Completion, ApiError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn execute(&self, operation: Operation) -> Result<Completion, ApiError> {
        self.calls.lock().unwrap().push(operation);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::Network("no scripted reply".into())))
    }
}

/// Creates a test App with a live session and the default page size.
pub fn test_app() -> App {
    App::new(true, 10)
}

pub fn unauthenticated_app() -> App {
    App::new(false, 10)
}
