// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock `PageDriver` scripted with a static element map.
//!
//! Tests register elements under the selectors that should match them, plus
//! optional image payloads, then assert on recorded fills and clicks.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use uniport_core::{ElementHandle, PageDriver, UniportError};

/// A scripted page for driving the login flow in tests.
#[derive(Default)]
pub struct MockPage {
    /// selector -> element id
    selectors: Mutex<HashMap<String, String>>,
    /// element id -> last filled value
    filled: Mutex<HashMap<String, String>>,
    /// element ids clicked, in order
    clicks: Mutex<Vec<String>>,
    /// element id -> embedded image bytes
    inline_images: Mutex<HashMap<String, Vec<u8>>>,
    /// element id -> source URL
    source_urls: Mutex<HashMap<String, String>>,
    /// URL -> fetchable image bytes
    fetchable: Mutex<HashMap<String, Vec<u8>>>,
    /// element id -> canvas-rendered image bytes
    rendered: Mutex<HashMap<String, Vec<u8>>>,
}

impl MockPage {
    /// Create an empty page (no element matches any selector).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element reachable via `selector`.
    pub async fn add_element(&self, selector: &str, id: &str) {
        self.selectors
            .lock()
            .await
            .insert(selector.to_string(), id.to_string());
    }

    /// Give an element an embedded (data URL) image payload.
    pub async fn set_inline_image(&self, id: &str, bytes: Vec<u8>) {
        self.inline_images.lock().await.insert(id.to_string(), bytes);
    }

    /// Give an element a source URL.
    pub async fn set_source_url(&self, id: &str, url: &str) {
        self.source_urls
            .lock()
            .await
            .insert(id.to_string(), url.to_string());
    }

    /// Make a URL fetchable with the given payload.
    pub async fn set_fetchable(&self, url: &str, bytes: Vec<u8>) {
        self.fetchable.lock().await.insert(url.to_string(), bytes);
    }

    /// Give an element a canvas-rendered payload.
    pub async fn set_rendered_image(&self, id: &str, bytes: Vec<u8>) {
        self.rendered.lock().await.insert(id.to_string(), bytes);
    }

    /// The last value filled into the element, if any.
    pub async fn filled_value(&self, id: &str) -> Option<String> {
        self.filled.lock().await.get(id).cloned()
    }

    /// Whether the element was clicked.
    pub async fn was_clicked(&self, id: &str) -> bool {
        self.clicks.lock().await.iter().any(|c| c == id)
    }
}

#[async_trait]
impl PageDriver for MockPage {
    async fn find(&self, selector: &str) -> Result<Option<ElementHandle>, UniportError> {
        Ok(self
            .selectors
            .lock()
            .await
            .get(selector)
            .map(|id| ElementHandle(id.clone())))
    }

    async fn fill(&self, element: &ElementHandle, value: &str) -> Result<(), UniportError> {
        self.filled
            .lock()
            .await
            .insert(element.0.clone(), value.to_string());
        Ok(())
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), UniportError> {
        self.clicks.lock().await.push(element.0.clone());
        Ok(())
    }

    async fn inline_image(
        &self,
        element: &ElementHandle,
    ) -> Result<Option<Vec<u8>>, UniportError> {
        Ok(self.inline_images.lock().await.get(&element.0).cloned())
    }

    async fn source_url(
        &self,
        element: &ElementHandle,
    ) -> Result<Option<String>, UniportError> {
        Ok(self.source_urls.lock().await.get(&element.0).cloned())
    }

    async fn fetch_image(&self, url: &str) -> Result<Option<Vec<u8>>, UniportError> {
        Ok(self.fetchable.lock().await.get(url).cloned())
    }

    async fn render_image(
        &self,
        element: &ElementHandle,
    ) -> Result<Option<Vec<u8>>, UniportError> {
        Ok(self.rendered.lock().await.get(&element.0).cloned())
    }
}
