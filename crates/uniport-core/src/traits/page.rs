// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page driver contract: the agent's only view of the host page DOM.
//!
//! The portal page itself is arbitrary markup outside this system. A driver
//! implementation (browser binding, test double) resolves selectors to opaque
//! handles and performs the few element operations the login flow needs.

use async_trait::async_trait;

use crate::error::UniportError;
use crate::types::ElementHandle;

/// Minimal DOM access for the login flow.
///
/// All lookup methods are best-effort: "not there" is `Ok(None)`, and errors
/// are reserved for driver-level failures (lost page, protocol error).
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Resolve a CSS selector to an element handle, if any element matches.
    async fn find(&self, selector: &str) -> Result<Option<ElementHandle>, UniportError>;

    /// Set the value of an input element.
    async fn fill(&self, element: &ElementHandle, value: &str) -> Result<(), UniportError>;

    /// Click an element.
    async fn click(&self, element: &ElementHandle) -> Result<(), UniportError>;

    /// Image bytes embedded directly in the element (data URL), if present.
    async fn inline_image(
        &self,
        element: &ElementHandle,
    ) -> Result<Option<Vec<u8>>, UniportError>;

    /// The element's source URL, if it has one.
    async fn source_url(&self, element: &ElementHandle)
        -> Result<Option<String>, UniportError>;

    /// Fetch image bytes from a URL within the page's session.
    async fn fetch_image(&self, url: &str) -> Result<Option<Vec<u8>>, UniportError>;

    /// Re-render the element to image bytes (canvas redraw).
    async fn render_image(
        &self,
        element: &ElementHandle,
    ) -> Result<Option<Vec<u8>>, UniportError>;
}
