use std::sync::Arc;

use crate::{
    cart::CartStore,
    chat::ChatClient,
    config::AppConfig,
    db::OrmConn,
    storage::Storage,
};

#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<OrmConn>,
    pub config: Arc<AppConfig>,
    pub carts: CartStore,
    pub storage: Storage,
    pub chat: ChatClient,
}

impl AppState {
    pub fn new(orm: OrmConn, config: AppConfig) -> Self {
        let storage = Storage::new(&config.storage_dir, &config.public_base_url);
        let chat = ChatClient::new(config.chat.clone());
        Self {
            orm: Arc::new(orm),
            config: Arc::new(config),
            carts: CartStore::new(),
            storage,
            chat,
        }
    }

    pub fn db(&self) -> &OrmConn {
        &self.orm
    }
}
