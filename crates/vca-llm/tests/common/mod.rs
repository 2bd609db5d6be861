//! Scripted chat backend for component tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use vca_core::error::{Result, VcaError};
use vca_core::ports::{ChatBackend, ChatRequest};

pub enum Script {
    Reply(String),
    Fail,
    Hang,
}

pub struct ScriptedChat {
    script: Script,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl ScriptedChat {
    pub fn replying(text: &str) -> Self {
        Self::new(Script::Reply(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::new(Script::Fail)
    }

    pub fn hanging() -> Self {
        Self::new(Script::Hang)
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedChat {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail => Err(VcaError::unavailable("scripted", "connection refused")),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            }
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
