// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Uniport login agent.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Uniport workspace. The store, page
//! driver, and OCR collaborators all implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::UniportError;
pub use traits::{KeyValueStore, OcrEngine, PageDriver};
pub use types::{ElementHandle, PortalField, Recognition, StoredCredentials};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_trait_modules_are_exported() {
        // If any trait module is missing or has a compile error, this test
        // won't compile.
        fn _assert_store<T: KeyValueStore>() {}
        fn _assert_page<T: PageDriver>() {}
        fn _assert_ocr<T: OcrEngine>() {}
    }
}
