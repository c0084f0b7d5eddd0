// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OCR engine contract.
//!
//! The recognition engine is a black box: image bytes in, text plus
//! confidence out. Injecting it as a trait keeps the captcha flow testable
//! with a fake implementation.

use async_trait::async_trait;

use crate::error::UniportError;
use crate::types::Recognition;

/// Black-box character recognition over captcha image bytes.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in the given image.
    async fn recognize(&self, image: &[u8]) -> Result<Recognition, UniportError>;
}
