//! Per-call-site rate limiting

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Remembers, per call site, when a record was last let through
///
/// A call is accepted when at least `1 / max_rate` seconds have passed since
/// the site's last accepted call; the first call at a site is always
/// accepted. Rejected calls leave the site's state untouched. Decisions for
/// one site are serialized by the map's shard lock, so concurrent callers
/// never both accept within one window.
#[derive(Debug, Default)]
pub struct RateLimiter {
    sites: DashMap<String, Instant>,
}

impl RateLimiter {
    /// A limiter with no known sites
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a call at `site` at time `now` may emit.
    pub fn should_emit(&self, site: &str, now: Instant, max_rate: f64) -> bool {
        let interval = min_interval(max_rate);

        if let Some(mut last) = self.sites.get_mut(site) {
            return accept(&mut last, now, interval);
        }

        match self.sites.entry(site.to_owned()) {
            Entry::Occupied(mut entry) => accept(entry.get_mut(), now, interval),
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        }
    }

    /// Forget the state of one site
    pub fn forget(&self, site: &str) {
        self.sites.remove(site);
    }

    /// Forget every site
    pub fn reset(&self) {
        self.sites.clear();
    }

    /// Number of sites seen so far
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether no site has been seen yet
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Minimum spacing between accepted calls. `None` means nothing after the
/// first call is ever accepted (non-positive, NaN, or vanishingly small
/// rates).
fn min_interval(max_rate: f64) -> Option<Duration> {
    if max_rate.is_nan() || max_rate <= 0.0 {
        None
    } else if max_rate.is_infinite() {
        Some(Duration::ZERO)
    } else {
        Duration::try_from_secs_f64(1.0 / max_rate).ok()
    }
}

fn accept(last: &mut Instant, now: Instant, interval: Option<Duration>) -> bool {
    match interval {
        Some(interval) if now.saturating_duration_since(*last) >= interval => {
            *last = now;
            true
        }
        _ => false,
    }
}
