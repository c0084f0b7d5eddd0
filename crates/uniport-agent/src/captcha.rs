// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Captcha image acquisition and recognition.
//!
//! Acquisition is a fallback chain: embedded image bytes first, then a fetch
//! of the element's source URL, then a canvas re-render. First non-empty
//! result wins; exhausting the chain is "not acquired", not an error.
//!
//! Recognition runs through the injected [`OcrEngine`] and is retried with a
//! freshly acquired image each attempt, up to a configured cap. Results
//! below the confidence floor are discarded.

use std::sync::Arc;

use tracing::{debug, warn};

use uniport_config::model::CaptchaConfig;
use uniport_core::{ElementHandle, OcrEngine, PageDriver, UniportError};

/// Acquire the captcha image bytes through the fallback chain.
pub async fn acquire_image(
    driver: &dyn PageDriver,
    element: &ElementHandle,
) -> Result<Option<Vec<u8>>, UniportError> {
    if let Some(bytes) = driver.inline_image(element).await?
        && !bytes.is_empty()
    {
        debug!("captcha image acquired from embedded data");
        return Ok(Some(bytes));
    }

    if let Some(url) = driver.source_url(element).await?
        && let Some(bytes) = driver.fetch_image(&url).await?
        && !bytes.is_empty()
    {
        debug!("captcha image acquired by fetching source url");
        return Ok(Some(bytes));
    }

    if let Some(bytes) = driver.render_image(element).await?
        && !bytes.is_empty()
    {
        debug!("captcha image acquired by re-rendering");
        return Ok(Some(bytes));
    }

    Ok(None)
}

/// Strip everything but ASCII alphanumerics from recognized text.
///
/// The portal's captchas are numeric/alphanumeric; whitespace and stray
/// punctuation are recognition noise.
pub fn sanitize_text(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Drives acquisition and recognition until a usable answer emerges or the
/// attempt cap is reached.
pub struct CaptchaSolver {
    ocr: Arc<dyn OcrEngine>,
    max_attempts: u32,
    min_confidence: f32,
}

impl CaptchaSolver {
    pub fn new(ocr: Arc<dyn OcrEngine>, config: &CaptchaConfig) -> Self {
        Self {
            ocr,
            max_attempts: config.max_attempts,
            min_confidence: config.min_confidence,
        }
    }

    /// Solve the captcha shown by `element`.
    ///
    /// `Ok(None)` means no usable answer after all attempts; the caller
    /// decides whether to proceed without one. OCR engine failures count as
    /// failed attempts rather than aborting the login flow.
    pub async fn solve(
        &self,
        driver: &dyn PageDriver,
        element: &ElementHandle,
    ) -> Result<Option<String>, UniportError> {
        for attempt in 1..=self.max_attempts {
            let Some(image) = acquire_image(driver, element).await? else {
                warn!(attempt, "captcha image could not be acquired");
                continue;
            };

            let recognition = match self.ocr.recognize(&image).await {
                Ok(recognition) => recognition,
                Err(e) => {
                    warn!(attempt, error = %e, "ocr engine failed");
                    continue;
                }
            };

            let text = sanitize_text(&recognition.text);
            if recognition.confidence >= self.min_confidence && !text.is_empty() {
                debug!(
                    attempt,
                    confidence = recognition.confidence,
                    "captcha recognized"
                );
                return Ok(Some(text));
            }
            debug!(
                attempt,
                confidence = recognition.confidence,
                "recognition discarded (below confidence floor or empty)"
            );
        }
        Ok(None)
    }
}
