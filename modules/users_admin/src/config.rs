use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// `modules.users_admin` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UsersAdminConfig {
    pub page_size: u64,
    pub max_search_len: usize,
    pub max_name_len: usize,
    /// Insert demo accounts after migrations when the table is empty.
    pub seed_demo: bool,
}

impl Default for UsersAdminConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_search_len: 100,
            max_name_len: 100,
            seed_demo: false,
        }
    }
}

impl From<&UsersAdminConfig> for ServiceConfig {
    fn from(cfg: &UsersAdminConfig) -> Self {
        Self {
            page_size: cfg.page_size.max(1),
            max_search_len: cfg.max_search_len,
            max_name_len: cfg.max_name_len,
        }
    }
}
