//! Scripted abstract source for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::{AbstractSource, SourceFuture};
use crate::LookupError;
use crate::cache::ABSTRACT_FIELD;

/// A configurable response for [`MockSource`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// A paper record carrying the abstract text.
    Abstract(String),
    /// A paper record without the abstract field.
    Missing,
    /// A transport-level failure.
    Error(String),
}

/// A hand-rolled [`AbstractSource`] with call counting.
///
/// Returns either a fixed response for every call, or a sequence of
/// responses (one per call, repeating the last when exhausted).
pub struct MockSource {
    responses: Mutex<Vec<MockResponse>>,
    fallback: MockResponse,
    call_count: AtomicUsize,
    keys: Mutex<Vec<String>>,
}

impl MockSource {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            call_count: AtomicUsize::new(0),
            keys: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that returns responses in order, repeating the last one.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        // Reversed so pop() yields them in order.
        responses.reverse();
        let fallback = responses[0].clone();
        Self {
            responses: Mutex::new(responses),
            fallback,
            call_count: AtomicUsize::new(0),
            keys: Mutex::new(Vec::new()),
        }
    }

    /// How many times `fetch()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Keys passed to `fetch()`, in call order.
    pub fn requested_keys(&self) -> Vec<String> {
        self.keys.lock().map(|k| k.clone()).unwrap_or_default()
    }

    fn next_response(&self) -> MockResponse {
        match self.responses.lock() {
            Ok(mut seq) => seq.pop().unwrap_or_else(|| self.fallback.clone()),
            Err(_) => self.fallback.clone(),
        }
    }
}

impl AbstractSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch<'a>(&'a self, key: &'a str) -> SourceFuture<'a> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut keys) = self.keys.lock() {
            keys.push(key.to_string());
        }
        let response = self.next_response();

        Box::pin(async move {
            match response {
                MockResponse::Abstract(text) => Ok(json!({ "PaperID": key, ABSTRACT_FIELD: text })),
                MockResponse::Missing => Ok(json!({ "PaperID": key })),
                MockResponse::Error(msg) => Err(LookupError::Other(msg)),
            }
        })
    }
}
