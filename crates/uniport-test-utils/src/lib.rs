// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for the Uniport workspace: an in-memory key-value store
//! with failure injection, a scripted page driver, and a queued OCR engine.
//!
//! These enable fast, deterministic tests of the vault and login flow
//! without a database file, a browser, or a real recognition model.

pub mod memory_store;
pub mod mock_ocr;
pub mod mock_page;

pub use memory_store::MemoryStore;
pub use mock_ocr::MockOcr;
pub use mock_page::MockPage;
