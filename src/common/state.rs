use std::sync::Arc;

use crate::config::Config;
use crate::i18n::FormatterCache;
use crate::vendor::VendorClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub vendor_client: Arc<VendorClient>,
    pub formatters: FormatterCache,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, vendor_client: VendorClient) -> Self {
        let formatters = FormatterCache::new(&config.default_locale);

        Self {
            config: Arc::new(config),
            vendor_client: Arc::new(vendor_client),
            formatters,
        }
    }
}
