//! Infinite-scroll trigger
//!
//! Turns visibility observations of a sentinel element at the end of the
//! list into next-page requests.

use super::machine::ProductFeed;
use crate::api::CatalogApi;
use crate::config::ScrollConfig;
use tracing::trace;

/// Fires when the sentinel crosses the visibility threshold.
///
/// Observations made while the feed is loading or failed never fire, but
/// they re-arm the trigger, so a sentinel that stays visible fires again as
/// soon as the gates clear. Without an intervening gated observation the
/// trigger only re-arms after the sentinel drops below the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrigger {
    threshold: f64,
    armed: bool,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(ScrollConfig::default().threshold)
    }
}

impl ScrollTrigger {
    /// Create a trigger; the threshold is clamped to `[0, 1]`, and a
    /// non-finite threshold falls back to the default
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            ScrollConfig::default().threshold
        };
        Self {
            threshold,
            armed: true,
        }
    }

    /// Create a trigger from config
    pub fn from_config(config: &ScrollConfig) -> Self {
        Self::new(config.threshold)
    }

    /// Visibility threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the next qualifying observation fires
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Record an observation; returns `true` when the callback should run
    pub fn observe(&mut self, visible_ratio: f64, loading: bool, has_error: bool) -> bool {
        if visible_ratio < self.threshold {
            self.armed = true;
            return false;
        }
        if loading || has_error {
            trace!(loading, has_error, "Scroll trigger gated");
            self.armed = true;
            return false;
        }
        if !self.armed {
            return false;
        }
        self.armed = false;
        true
    }

    /// Observe with the feed's own gates
    pub fn observe_feed<C: CatalogApi>(&mut self, visible_ratio: f64, feed: &ProductFeed<C>) -> bool {
        self.observe(visible_ratio, feed.loading(), feed.error().is_some())
    }

    /// Observe and, when fired, load the next page. Returns whether it fired.
    ///
    /// The feed was loading for the duration of an issued request, which
    /// counts as a gated period: the trigger comes back armed.
    pub async fn on_visibility<C: CatalogApi>(
        &mut self,
        visible_ratio: f64,
        feed: &mut ProductFeed<C>,
    ) -> bool {
        let fired = self.observe_feed(visible_ratio, feed);
        if fired {
            let generation = feed.generation();
            feed.fetch_next_page().await;
            if feed.generation() != generation {
                self.armed = true;
            }
        }
        fired
    }
}
