pub mod chat_api;

use crate::domain::models::BackendBox;
use crate::domain::models::Endpoint;

pub struct BackendManager {}

impl BackendManager {
    pub fn get(endpoint: Endpoint) -> BackendBox {
        return Box::new(chat_api::ChatApi::new(endpoint));
    }
}
