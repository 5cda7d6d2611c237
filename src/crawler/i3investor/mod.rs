use crate::config::SETTINGS;

pub mod quote;

pub const HOST: &str = "klse.i3investor.com";

/// Quote-page scraper bound to one upstream host.
#[derive(Clone, Debug)]
pub struct I3Investor {
    host: String,
}

impl I3Investor {
    /// Scraper for the host named in `SETTINGS.quote.host`.
    pub fn new() -> Self {
        I3Investor {
            host: SETTINGS.quote.host.clone(),
        }
    }

    pub fn with_host(host: impl Into<String>) -> Self {
        I3Investor { host: host.into() }
    }
}

impl Default for I3Investor {
    fn default() -> Self {
        Self::new()
    }
}
