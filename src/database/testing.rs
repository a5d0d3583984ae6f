//! Backend doubles for exercising failure paths.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::backend::KeyValueStore;
use super::error::StorageError;

/// In-memory backend that can be told to reject reads or writes.
#[derive(Default)]
pub struct FlakyStore {
    items: Mutex<HashMap<String, String>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl FlakyStore {
    pub fn failing_writes() -> Self {
        FlakyStore {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn failing_reads() -> Self {
        FlakyStore {
            fail_reads: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable(format!("read of {} refused", key)));
        }
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("quota exceeded".into()));
        }
        self.items.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}
