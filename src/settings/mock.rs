//! テスト用インメモリ保存先

use super::*;
use std::sync::RwLock;

pub struct MemoryTokenStore {
    settings: RwLock<Settings>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(Settings::default()),
        }
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save_token(token).unwrap();
        store
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Settings> {
        Ok(self.settings.read().unwrap().clone())
    }

    fn save_token(&self, token: &str) -> Result<Settings> {
        let settings = new_settings(token)?;
        *self.settings.write().unwrap() = settings.clone();
        Ok(settings)
    }

    fn clear(&self) -> Result<()> {
        *self.settings.write().unwrap() = Settings::default();
        Ok(())
    }
}
