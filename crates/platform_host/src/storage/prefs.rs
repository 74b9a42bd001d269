//! Persisted key/value settings store contract and in-memory adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Object-safe boxed future used by [`SettingsStore`] async methods.
pub type SettingsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Durable settings storage (JSON text per key) that survives process restarts.
pub trait SettingsStore {
    /// Loads the raw JSON string stored under `key`.
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> SettingsStoreFuture<'a, Result<Option<String>, String>>;

    /// Stores a raw JSON string under `key`.
    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> SettingsStoreFuture<'a, Result<(), String>>;

    /// Deletes `key`.
    fn delete<'a>(&'a self, key: &'a str) -> SettingsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Settings store that never persists anything.
pub struct NoopSettingsStore;

impl SettingsStore for NoopSettingsStore {
    fn load_raw<'a>(
        &'a self,
        _key: &'a str,
    ) -> SettingsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_raw<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> SettingsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete<'a>(&'a self, _key: &'a str) -> SettingsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory settings store; clones share the same map.
pub struct MemorySettingsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl SettingsStore for MemorySettingsStore {
    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> SettingsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> SettingsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> SettingsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Loads and deserializes a typed setting through a [`SettingsStore`].
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub async fn load_setting_with<S: SettingsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_raw(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse setting `{key}`: {err}"))?;
    Ok(Some(value))
}

/// Serializes and saves a typed setting through a [`SettingsStore`].
///
/// # Errors
///
/// Returns an error when serialization or the store save fails.
pub async fn save_setting_with<S: SettingsStore + ?Sized, T: Serialize + ?Sized>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value)
        .map_err(|err| format!("failed to serialize setting `{key}`: {err}"))?;
    store.save_raw(key, &raw).await
}
