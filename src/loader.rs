// src/loader.rs
//! # Page loader
//!
//! The background refresh never navigates the visible page: it pulls portal
//! pages through an off-screen load, waits for the markup to settle, then
//! hands the document to the extractors. `PageSource` is the seam; production
//! uses [`HttpSource`], tests substitute a scripted source.
//!
//! Waits are sequential: each required element gets its own full budget, so a
//! page that needs two elements may take up to twice the per-element wait.
//! The first check happens before any sleep, so an already-settled page costs
//! zero wait time.

use std::error::Error;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::consts::{HOST, PORTAL_PREFIX};
use crate::config::RefreshConfig;
use crate::core::html::to_lower;
use crate::net;
use crate::specs::Selector;

/// Where page markup comes from. `fetch` returns the page's current markup;
/// repeated calls may observe more content as the portal's scripts fill in.
pub trait PageSource {
    fn fetch(&mut self, page: &str) -> Result<String, Box<dyn Error>>;
}

/// Production source: plain GET against the portal.
pub struct HttpSource;

impl PageSource for HttpSource {
    fn fetch(&mut self, page: &str) -> Result<String, Box<dyn Error>> {
        net::http_get(HOST, &join!(PORTAL_PREFIX, page))
    }
}

/// One off-screen page load: fetch, wait for the required elements, return
/// the settled markup.
pub struct Frame<'a, S: PageSource> {
    source: &'a mut S,
    cfg: RefreshConfig,
}

impl<'a, S: PageSource> Frame<'a, S> {
    pub fn new(source: &'a mut S, cfg: RefreshConfig) -> Self {
        Self { source, cfg }
    }

    /// Load `page` and wait until every selector's marker is present.
    /// Selectors are waited on in order, each with its own budget.
    pub fn load(&mut self, page: &str, selectors: &[Selector]) -> Result<String, Box<dyn Error>> {
        let mut markup = self.fetch_container(page)?;
        for sel in selectors {
            self.wait_for(page, &mut markup, sel)?;
        }
        logd!("loader: {page} settled ({} bytes)", markup.len());
        Ok(markup)
    }

    /// Initial fetch, retried until the page container shows up. The portal
    /// occasionally serves a shell document on the first hit.
    fn fetch_container(&mut self, page: &str) -> Result<String, Box<dyn Error>> {
        let mut attempt = 0u32;
        loop {
            let markup = self.source.fetch(page)?;
            if !markup.trim().is_empty() {
                return Ok(markup);
            }
            attempt += 1;
            if attempt >= self.cfg.max_container_retries {
                return Err(format!(
                    "container for {page} empty after {attempt} attempts"
                )
                .into());
            }
            thread::sleep(Duration::from_millis(self.cfg.container_retry_delay_ms));
        }
    }

    fn wait_for(
        &mut self,
        page: &str,
        markup: &mut String,
        sel: &Selector,
    ) -> Result<(), Box<dyn Error>> {
        let deadline = Instant::now() + Duration::from_millis(self.cfg.element_wait_ms);
        // check before the first sleep
        if present(markup, sel) {
            return Ok(());
        }
        while Instant::now() < deadline {
            thread::sleep(Duration::from_millis(self.cfg.poll_interval_ms));
            *markup = self.source.fetch(page)?;
            if present(markup, sel) {
                return Ok(());
            }
        }
        loge!("loader: timed out waiting for {} on {page}", sel.css);
        Err(format!(
            "timed out after {}ms waiting for {} on {page}",
            self.cfg.element_wait_ms, sel.css
        )
        .into())
    }
}

fn present(markup: &str, sel: &Selector) -> bool {
    to_lower(markup).contains(&to_lower(sel.marker))
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Scripted source: each page maps to a queue of responses; the last one
    /// repeats once the queue drains.
    pub struct ScriptedSource {
        responses: HashMap<String, Vec<String>>,
        pub fetches: u32,
    }

    impl ScriptedSource {
        pub fn new() -> Self {
            Self {
                responses: HashMap::new(),
                fetches: 0,
            }
        }

        pub fn page(mut self, page: &str, responses: &[&str]) -> Self {
            self.responses
                .insert(page.to_string(), responses.iter().map(|s| s!(*s)).collect());
            self
        }
    }

    impl PageSource for ScriptedSource {
        fn fetch(&mut self, page: &str) -> Result<String, Box<dyn Error>> {
            self.fetches += 1;
            let queue = self
                .responses
                .get_mut(page)
                .ok_or_else(|| format!("no script for page {page}"))?;
            Ok(if queue.len() > 1 {
                queue.remove(0)
            } else {
                queue.first().cloned().unwrap_or_default()
            })
        }
    }
}
