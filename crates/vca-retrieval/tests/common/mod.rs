//! Counting backends for pipeline tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vca_core::error::{Result, VcaError};
use vca_core::ports::{
    ChatBackend, ChatRequest, LegalDocument, LegalSearchBackend, LegalSearchRequest, SpeechBackend,
    SpeechRequest,
};

/// Chat backend answering each call from a queue of replies
pub struct QueuedChat {
    replies: Mutex<Vec<Result<String>>>,
    calls: AtomicUsize,
}

impl QueuedChat {
    /// Replies are consumed in order; an exhausted queue fails the call
    pub fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        let mut replies = replies;
        replies.reverse();
        Arc::new(Self {
            replies: Mutex::new(replies),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for QueuedChat {
    async fn complete(&self, _request: &ChatRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(VcaError::unavailable("queued", "no reply left")))
    }

    fn name(&self) -> &str {
        "queued"
    }
}

pub enum LegalScript {
    Documents(Vec<LegalDocument>),
    Fail,
    Hang,
}

pub struct CountingLegal {
    script: LegalScript,
    calls: AtomicUsize,
    last_query: Mutex<Option<LegalSearchRequest>>,
}

impl CountingLegal {
    pub fn new(script: LegalScript) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<LegalSearchRequest> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl LegalSearchBackend for CountingLegal {
    async fn search(&self, request: &LegalSearchRequest) -> Result<Vec<LegalDocument>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(request.clone());
        match &self.script {
            LegalScript::Documents(docs) => Ok(docs.clone()),
            LegalScript::Fail => Err(VcaError::unavailable("counting", "503 Service Unavailable")),
            LegalScript::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
        }
    }

    fn name(&self) -> &str {
        "counting"
    }
}

pub struct CountingSpeech {
    transcript: String,
    calls: AtomicUsize,
}

impl CountingSpeech {
    pub fn new(transcript: &str) -> Arc<Self> {
        Arc::new(Self {
            transcript: transcript.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechBackend for CountingSpeech {
    async fn transcribe(&self, _request: &SpeechRequest<'_>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.transcript.clone())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

pub fn doc(title: &str, snippet: &str) -> LegalDocument {
    LegalDocument {
        title: title.to_string(),
        snippet: snippet.to_string(),
    }
}
