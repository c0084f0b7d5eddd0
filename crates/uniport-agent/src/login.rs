// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The login flow: retrieve credentials, fill the form, solve the captcha,
//! submit.
//!
//! Everything past credential retrieval is best-effort. A page that does not
//! expose the identifier and passphrase fields is simply not the login form;
//! a missing captcha is skipped; a missing submit button leaves the form
//! filled for the human to finish.

use std::sync::{Arc, OnceLock};

use secrecy::ExposeSecret;
use tracing::{debug, info, warn};

use uniport_config::UniportConfig;
use uniport_core::{OcrEngine, PageDriver, UniportError};
use uniport_vault::CredentialVault;

use crate::captcha::CaptchaSolver;
use crate::selector::PortalSelectors;

/// What the flow accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Form filled and submitted.
    Submitted,
    /// Form filled; submit skipped (disabled by config or button missing).
    Filled,
    /// The vault holds no usable credentials; nothing was touched.
    NotConfigured,
    /// The page does not expose the credential fields.
    FieldsNotFound,
}

impl std::fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginOutcome::Submitted => write!(f, "submitted"),
            LoginOutcome::Filled => write!(f, "filled"),
            LoginOutcome::NotConfigured => write!(f, "not_configured"),
            LoginOutcome::FieldsNotFound => write!(f, "fields_not_found"),
        }
    }
}

/// Automates one login page.
pub struct LoginAgent {
    driver: Arc<dyn PageDriver>,
    vault: CredentialVault,
    solver: CaptchaSolver,
    selectors: PortalSelectors,
    auto_submit: bool,
}

impl LoginAgent {
    pub fn new(
        driver: Arc<dyn PageDriver>,
        ocr: Arc<dyn OcrEngine>,
        vault: CredentialVault,
        config: &UniportConfig,
    ) -> Self {
        Self {
            driver,
            vault,
            solver: CaptchaSolver::new(ocr, &config.captcha),
            selectors: PortalSelectors::from_config(&config.portal),
            auto_submit: config.portal.auto_submit,
        }
    }

    /// Run the flow once against the current page.
    pub async fn run(&self) -> Result<LoginOutcome, UniportError> {
        let driver = self.driver.as_ref();

        let credentials = self.vault.retrieve().await?;
        let (Some(identifier), Some(passphrase)) =
            (credentials.identifier, credentials.passphrase)
        else {
            info!("vault holds no credentials; login skipped");
            return Ok(LoginOutcome::NotConfigured);
        };

        let Some(identifier_field) = self.selectors.identifier.locate(driver).await? else {
            info!("identifier field not found; page is not the login form");
            return Ok(LoginOutcome::FieldsNotFound);
        };
        let Some(passphrase_field) = self.selectors.passphrase.locate(driver).await? else {
            info!("passphrase field not found; page is not the login form");
            return Ok(LoginOutcome::FieldsNotFound);
        };

        driver.fill(&identifier_field, identifier.expose_secret()).await?;
        driver.fill(&passphrase_field, passphrase.expose_secret()).await?;
        debug!("credential fields filled");

        match (
            self.selectors.captcha_image.locate(driver).await?,
            self.selectors.captcha_input.locate(driver).await?,
        ) {
            (Some(image), Some(input)) => {
                match self.solver.solve(driver, &image).await? {
                    Some(answer) => {
                        driver.fill(&input, &answer).await?;
                        debug!("captcha answer filled");
                    }
                    None => warn!("captcha could not be solved; continuing without it"),
                }
            }
            _ => debug!("captcha elements not found; skipping captcha handling"),
        }

        if !self.auto_submit {
            info!("auto submit disabled; form left filled");
            return Ok(LoginOutcome::Filled);
        }

        let Some(submit) = self.selectors.submit.locate(driver).await? else {
            info!("submit button not found; form left filled");
            return Ok(LoginOutcome::Filled);
        };
        driver.click(&submit).await?;
        info!("login form submitted");
        Ok(LoginOutcome::Submitted)
    }
}

static ACTIVE_AGENT: OnceLock<Arc<LoginAgent>> = OnceLock::new();

/// Register `agent` as the process-wide instance.
///
/// Construction is idempotent: if an agent is already active, the new one is
/// dropped and the existing instance is returned. At most one login flow is
/// ever active per process.
pub fn activate(agent: LoginAgent) -> Arc<LoginAgent> {
    ACTIVE_AGENT.get_or_init(|| Arc::new(agent)).clone()
}

/// The active instance, if one was registered.
pub fn active() -> Option<Arc<LoginAgent>> {
    ACTIVE_AGENT.get().cloned()
}
