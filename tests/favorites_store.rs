use product_carousel::{
    Error, Favorites, MemoryStorage, Result, Storage, is_favorite, read_favorites,
    toggle_favorite,
};

#[test]
fn missing_or_null_favorites_read_as_empty() -> Result<()> {
    let storage = MemoryStorage::new();
    assert!(read_favorites(&storage, "favorites")?.is_empty());

    let storage = MemoryStorage::with_items([("favorites", "null")]);
    assert!(read_favorites(&storage, "favorites")?.is_empty());
    Ok(())
}

#[test]
fn malformed_favorites_are_an_error() {
    for raw in ["{", r#"{"1":true}"#, "[1, 2]", "\"1\""] {
        let storage = MemoryStorage::with_items([("favorites", raw)]);
        let err = read_favorites(&storage, "favorites").expect_err(raw);
        assert!(matches!(err, Error::CorruptFavorites { .. }), "{raw}");
    }
}

#[test]
fn duplicate_ids_are_dropped_on_read() -> Result<()> {
    let storage = MemoryStorage::with_items([("favorites", r#"["3","1","3","2","1"]"#)]);
    assert_eq!(read_favorites(&storage, "favorites")?, ["3", "1", "2"]);
    Ok(())
}

#[test]
fn toggle_adds_then_removes() -> Result<()> {
    let mut storage = MemoryStorage::new();

    assert!(toggle_favorite(&mut storage, "favorites", "7")?);
    assert_eq!(storage.get_item("favorites").as_deref(), Some(r#"["7"]"#));
    assert!(is_favorite(&storage, "favorites", "7")?);

    assert!(!toggle_favorite(&mut storage, "favorites", "7")?);
    assert_eq!(storage.get_item("favorites").as_deref(), Some("[]"));
    assert!(!is_favorite(&storage, "favorites", "7")?);
    Ok(())
}

#[test]
fn toggle_keeps_other_ids_in_order() -> Result<()> {
    let mut storage = MemoryStorage::with_items([("favorites", r#"["1","2","3"]"#)]);
    assert!(!toggle_favorite(&mut storage, "favorites", "2")?);
    assert_eq!(read_favorites(&storage, "favorites")?, ["1", "3"]);
    assert!(toggle_favorite(&mut storage, "favorites", "2")?);
    assert_eq!(read_favorites(&storage, "favorites")?, ["1", "3", "2"]);
    Ok(())
}

#[test]
fn stale_ids_are_kept() -> Result<()> {
    let mut storage = MemoryStorage::with_items([("favorites", r#"["gone"]"#)]);
    toggle_favorite(&mut storage, "favorites", "1")?;
    assert_eq!(read_favorites(&storage, "favorites")?, ["gone", "1"]);
    Ok(())
}

#[test]
fn toggle_propagates_write_failures() {
    let mut storage = MemoryStorage::new();
    storage.set_fail_writes(true);
    let err = toggle_favorite(&mut storage, "favorites", "1").expect_err("writes fail");
    assert!(matches!(err, Error::Storage(_)));
    assert_eq!(storage.get_item("favorites"), None);
}

#[test]
fn favorites_handle_uses_its_key() -> Result<()> {
    let favorites = Favorites::new("wishlist");
    let mut storage = MemoryStorage::new();

    assert!(favorites.toggle(&mut storage, "a")?);
    assert!(favorites.contains(&storage, "a")?);
    assert_eq!(favorites.read(&storage)?, ["a"]);
    assert_eq!(storage.get_item("favorites"), None);
    assert_eq!(favorites.key(), "wishlist");
    Ok(())
}

#[test]
fn memory_storage_remove_item_clears_entry() -> Result<()> {
    let mut storage = MemoryStorage::with_items([("favorites", "[]")]);
    assert_eq!(storage.len(), 1);
    storage.remove_item("favorites")?;
    assert!(storage.is_empty());
    storage.remove_item("favorites")?;
    Ok(())
}
