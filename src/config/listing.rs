//! `[listing]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[listing]` section in folio.toml - how readers page through posts.
///
/// # Example
/// ```toml
/// [listing]
/// per_page = 6
/// recommendations = 2
/// words_per_minute = 200
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ListingConfig {
    /// Entries added by each "load more" step.
    #[serde(default = "defaults::listing::per_page")]
    #[educe(Default = defaults::listing::per_page())]
    pub per_page: usize,

    /// Other posts suggested under a post detail.
    #[serde(default = "defaults::listing::recommendations")]
    #[educe(Default = defaults::listing::recommendations())]
    pub recommendations: usize,

    /// Reading speed used for the reading-time estimate.
    #[serde(default = "defaults::listing::words_per_minute")]
    #[educe(Default = defaults::listing::words_per_minute())]
    pub words_per_minute: usize,
}
