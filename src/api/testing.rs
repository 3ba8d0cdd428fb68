//! Scripted transport for unit tests

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;

use super::transport::{GraphQlRequest, Transport};
use crate::error::{DashError, DashResult};

/// A request as the transport saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub operation_name: &'static str,
    pub variables: Value,
    pub token: Option<String>,
}

/// Replays queued replies in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<DashResult<Value>>>,
    requests: RefCell<Vec<Recorded>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful `data` object
    pub fn reply(self, data: Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(data));
        self
    }

    pub fn fail(self, error: DashError) -> Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &GraphQlRequest, token: Option<&str>) -> DashResult<Value> {
        self.requests.borrow_mut().push(Recorded {
            operation_name: request.operation_name,
            variables: request.variables.clone(),
            token: token.map(String::from),
        });
        self.replies.borrow_mut().pop_front().unwrap_or_else(|| {
            Err(DashError::Network(format!(
                "no scripted reply for {}",
                request.operation_name
            )))
        })
    }
}
