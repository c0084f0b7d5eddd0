// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort element discovery via ordered selector chains.
//!
//! A chain is a list of candidate CSS selectors tried in sequence; the first
//! match wins. Exhausting the list is a distinct "not found" outcome, not an
//! error, so callers can degrade gracefully (e.g. skip captcha handling when
//! the page has no captcha field).

use tracing::debug;

use uniport_config::model::PortalConfig;
use uniport_core::{ElementHandle, PageDriver, PortalField, UniportError};

/// An ordered list of candidate selectors for one portal element.
pub struct SelectorChain {
    field: PortalField,
    candidates: Vec<String>,
}

impl SelectorChain {
    pub fn new(field: PortalField, candidates: Vec<String>) -> Self {
        Self { field, candidates }
    }

    /// The portal element this chain locates.
    pub fn field(&self) -> PortalField {
        self.field
    }

    /// Try each candidate in order; first match wins.
    ///
    /// `Ok(None)` means no candidate matched. Driver errors propagate --
    /// they signal a broken page connection, not a missing element.
    pub async fn locate(
        &self,
        driver: &dyn PageDriver,
    ) -> Result<Option<ElementHandle>, UniportError> {
        for selector in &self.candidates {
            if let Some(handle) = driver.find(selector).await? {
                debug!(field = %self.field, selector = %selector, "element located");
                return Ok(Some(handle));
            }
        }
        debug!(field = %self.field, "no candidate selector matched");
        Ok(None)
    }
}

/// The five chains the login flow needs, built from portal configuration.
pub struct PortalSelectors {
    pub identifier: SelectorChain,
    pub passphrase: SelectorChain,
    pub captcha_image: SelectorChain,
    pub captcha_input: SelectorChain,
    pub submit: SelectorChain,
}

impl PortalSelectors {
    pub fn from_config(portal: &PortalConfig) -> Self {
        Self {
            identifier: SelectorChain::new(
                PortalField::Identifier,
                portal.identifier_selectors.clone(),
            ),
            passphrase: SelectorChain::new(
                PortalField::Passphrase,
                portal.passphrase_selectors.clone(),
            ),
            captcha_image: SelectorChain::new(
                PortalField::CaptchaImage,
                portal.captcha_image_selectors.clone(),
            ),
            captcha_input: SelectorChain::new(
                PortalField::CaptchaInput,
                portal.captcha_input_selectors.clone(),
            ),
            submit: SelectorChain::new(PortalField::Submit, portal.submit_selectors.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniport_test_utils::MockPage;

    #[tokio::test]
    async fn first_matching_candidate_wins() {
        let page = MockPage::new();
        page.add_element("input[name='username']", "by-name").await;
        page.add_element("#username", "by-id").await;

        let chain = SelectorChain::new(
            PortalField::Identifier,
            vec!["#username".to_string(), "input[name='username']".to_string()],
        );

        let handle = chain.locate(&page).await.unwrap().unwrap();
        assert_eq!(handle.0, "by-id");
    }

    #[tokio::test]
    async fn later_candidates_are_tried_when_earlier_miss() {
        let page = MockPage::new();
        page.add_element("input[name='j_username']", "legacy").await;

        let chain = SelectorChain::new(
            PortalField::Identifier,
            vec![
                "#username".to_string(),
                "input[name='username']".to_string(),
                "input[name='j_username']".to_string(),
            ],
        );

        let handle = chain.locate(&page).await.unwrap().unwrap();
        assert_eq!(handle.0, "legacy");
    }

    #[tokio::test]
    async fn exhausted_chain_is_not_found_not_an_error() {
        let page = MockPage::new();
        let chain = SelectorChain::new(PortalField::Submit, vec!["#loginBtn".to_string()]);
        assert!(chain.locate(&page).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn portal_selectors_use_configured_chains() {
        let mut portal = PortalConfig::default();
        portal.identifier_selectors = vec!["#student-id".to_string()];

        let page = MockPage::new();
        page.add_element("#student-id", "custom").await;

        let selectors = PortalSelectors::from_config(&portal);
        let handle = selectors.identifier.locate(&page).await.unwrap().unwrap();
        assert_eq!(handle.0, "custom");
    }
}
