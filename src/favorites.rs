use super::*;

/// Reads the favorites array stored under `key`.
///
/// A missing entry (or a stored `null`) is an empty set. Duplicates are
/// dropped, keeping the first occurrence.
pub fn read_favorites<S: Storage + ?Sized>(storage: &S, key: &str) -> Result<Vec<String>> {
    let Some(raw) = storage.get_item(key) else {
        return Ok(Vec::new());
    };
    let ids: Option<Vec<String>> =
        serde_json::from_str(&raw).map_err(|err| Error::CorruptFavorites {
            key: key.to_string(),
            message: err.to_string(),
        })?;
    let mut seen = HashSet::new();
    Ok(ids
        .unwrap_or_default()
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect())
}

pub fn is_favorite<S: Storage + ?Sized>(storage: &S, key: &str, id: &str) -> Result<bool> {
    Ok(read_favorites(storage, key)?.iter().any(|fav| fav == id))
}

/// Adds `id` when absent, removes it when present. Returns the new membership.
pub fn toggle_favorite<S: Storage + ?Sized>(storage: &mut S, key: &str, id: &str) -> Result<bool> {
    let mut ids = read_favorites(storage, key)?;
    let favorited = match ids.iter().position(|fav| fav == id) {
        Some(index) => {
            ids.remove(index);
            false
        }
        None => {
            ids.push(id.to_string());
            true
        }
    };
    let raw = serde_json::to_string(&ids).map_err(|err| Error::Storage(err.to_string()))?;
    storage.set_item(key, &raw)?;
    tracing::debug!(%key, %id, favorited, "favorite toggled");
    Ok(favorited)
}

/// The favorites set under a fixed storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorites {
    key: String,
}

impl Favorites {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn read<S: Storage + ?Sized>(&self, storage: &S) -> Result<Vec<String>> {
        read_favorites(storage, &self.key)
    }

    pub fn contains<S: Storage + ?Sized>(&self, storage: &S, id: &str) -> Result<bool> {
        is_favorite(storage, &self.key, id)
    }

    pub fn toggle<S: Storage + ?Sized>(&self, storage: &mut S, id: &str) -> Result<bool> {
        toggle_favorite(storage, &self.key, id)
    }
}
