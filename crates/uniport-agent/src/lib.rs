// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page automation for the Uniport login agent.
//!
//! Locates the portal's login-form elements through ordered selector chains,
//! fills credentials retrieved from the vault, solves the captcha through
//! the injected OCR capability, and submits the form. The page DOM and the
//! OCR engine stay behind the traits defined in `uniport-core`.

pub mod captcha;
pub mod login;
pub mod selector;

pub use captcha::{acquire_image, sanitize_text, CaptchaSolver};
pub use login::{activate, active, LoginAgent, LoginOutcome};
pub use selector::{PortalSelectors, SelectorChain};
