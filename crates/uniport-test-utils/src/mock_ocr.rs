// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock OCR engine with pre-configured recognitions.
//!
//! Results are popped from a FIFO queue; when the queue is empty the engine
//! "sees nothing" (empty text, zero confidence), which exercises retry and
//! give-up paths.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use uniport_core::{OcrEngine, Recognition, UniportError};

/// A mock OCR engine that returns pre-configured recognitions.
#[derive(Default)]
pub struct MockOcr {
    results: Mutex<VecDeque<Recognition>>,
    /// Images the engine was asked to recognize, in order.
    seen: Mutex<Vec<Vec<u8>>>,
}

impl MockOcr {
    /// Create a mock engine with an empty result queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock engine pre-loaded with the given results.
    pub fn with_results(results: Vec<Recognition>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(results)),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Add a result to the end of the queue.
    pub async fn add_result(&self, text: &str, confidence: f32) {
        self.results.lock().await.push_back(Recognition {
            text: text.to_string(),
            confidence,
        });
    }

    /// How many recognitions were requested.
    pub async fn call_count(&self) -> usize {
        self.seen.lock().await.len()
    }
}

#[async_trait]
impl OcrEngine for MockOcr {
    async fn recognize(&self, image: &[u8]) -> Result<Recognition, UniportError> {
        self.seen.lock().await.push(image.to_vec());
        Ok(self.results.lock().await.pop_front().unwrap_or(Recognition {
            text: String::new(),
            confidence: 0.0,
        }))
    }
}
