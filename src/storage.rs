use super::*;

/// String key/value storage with `localStorage` semantics.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// In-process storage. Writes can be made to fail to simulate a full quota.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: items
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            fail_writes: false,
        }
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Storage(format!("quota exceeded writing {key}")));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(feature = "web")]
pub use web::WebStorage;

#[cfg(feature = "web")]
mod web {
    use super::*;

    /// `window.localStorage`.
    #[derive(Debug, Clone)]
    pub struct WebStorage {
        inner: web_sys::Storage,
    }

    impl WebStorage {
        pub fn local() -> Result<Self> {
            let window =
                web_sys::window().ok_or_else(|| Error::Storage("no global window".into()))?;
            let inner = window
                .local_storage()
                .map_err(|err| Error::Storage(format!("localStorage unavailable: {err:?}")))?
                .ok_or_else(|| Error::Storage("localStorage unavailable".into()))?;
            Ok(Self { inner })
        }
    }

    impl Storage for WebStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.inner.get_item(key).ok().flatten()
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
            self.inner
                .set_item(key, value)
                .map_err(|err| Error::Storage(format!("failed to write {key}: {err:?}")))
        }

        fn remove_item(&mut self, key: &str) -> Result<()> {
            self.inner
                .remove_item(key)
                .map_err(|err| Error::Storage(format!("failed to remove {key}: {err:?}")))
        }
    }
}
