use std::sync::Arc;

use crate::{config::Config, database::Store};

pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let store = Store::connect(&config.database_url, &config.database_name)
            .await
            .expect("Database misconfigured!");

        Arc::new(Self { config, store })
    }
}
