use product_carousel::{
    CarouselConfig, Error, LoadOutcome, MemoryStorage, MockFetcher, ProductLoader, Result,
    Storage, load_products,
};

const ENDPOINT: &str = "https://feed.test/products.json";
const FEED: &str = r#"[
  {"id": "1", "name": "Lamp", "price": 120, "img": "https://cdn.test/1.png", "url": "https://shop.test/p/1"},
  {"id": "2", "name": "Chair", "price": 349.9, "img": "https://cdn.test/2.png", "url": "https://shop.test/p/2"}
]"#;

fn loader() -> ProductLoader {
    ProductLoader::new(ENDPOINT, "products")
}

#[test]
fn cached_products_are_returned_without_a_request() -> Result<()> {
    let mut storage = MemoryStorage::with_items([("products", FEED)]);
    let mut fetcher = MockFetcher::new();
    let mut loader = loader();

    let products = loader.load(&mut storage, &mut fetcher)?;
    assert_eq!(products.len(), 2);
    assert_eq!(products[1].name, "Chair");
    assert_eq!(fetcher.call_count(), 0);
    assert_eq!(loader.last_outcome(), Some(LoadOutcome::Cached));
    Ok(())
}

#[test]
fn fetched_body_is_cached_verbatim() -> Result<()> {
    let mut storage = MemoryStorage::new();
    let mut fetcher = MockFetcher::new();
    fetcher.set_json(ENDPOINT, FEED);
    let mut loader = loader();

    let products = loader.load(&mut storage, &mut fetcher)?;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, "1");
    assert_eq!(products[1].price, 349.9);
    assert_eq!(storage.get_item("products").as_deref(), Some(FEED));
    assert_eq!(fetcher.take_calls(), vec![ENDPOINT.to_string()]);
    assert_eq!(loader.last_outcome(), Some(LoadOutcome::Fetched));

    // The second load is served from the cache.
    let again = loader.load(&mut storage, &mut fetcher)?;
    assert_eq!(again, products);
    assert_eq!(fetcher.call_count(), 0);
    assert_eq!(loader.last_outcome(), Some(LoadOutcome::Cached));
    Ok(())
}

#[test]
fn empty_cache_value_counts_as_a_miss() -> Result<()> {
    let mut storage = MemoryStorage::with_items([("products", "")]);
    let mut fetcher = MockFetcher::new();
    fetcher.set_json(ENDPOINT, FEED);

    let products = loader().load(&mut storage, &mut fetcher)?;
    assert_eq!(products.len(), 2);
    assert_eq!(fetcher.call_count(), 1);
    Ok(())
}

#[test]
fn network_failure_degrades_to_empty_list() -> Result<()> {
    let mut storage = MemoryStorage::new();
    let mut fetcher = MockFetcher::new();
    fetcher.set_failure(ENDPOINT, "connection refused");
    let mut loader = loader();

    assert!(loader.load(&mut storage, &mut fetcher)?.is_empty());
    assert_eq!(storage.get_item("products"), None);
    assert_eq!(loader.last_outcome(), Some(LoadOutcome::Degraded));
    Ok(())
}

#[test]
fn unmocked_endpoint_degrades_to_empty_list() -> Result<()> {
    let mut storage = MemoryStorage::new();
    let mut fetcher = MockFetcher::new();
    assert!(loader().load(&mut storage, &mut fetcher)?.is_empty());
    assert_eq!(fetcher.call_count(), 1);
    assert!(storage.is_empty());
    Ok(())
}

#[test]
fn error_status_degrades_to_empty_list() -> Result<()> {
    for status in [404, 500, 301] {
        let mut storage = MemoryStorage::new();
        let mut fetcher = MockFetcher::new();
        fetcher.set_response(ENDPOINT, status, FEED);

        assert!(loader().load(&mut storage, &mut fetcher)?.is_empty(), "{status}");
        assert_eq!(storage.get_item("products"), None, "{status}");
    }
    Ok(())
}

#[test]
fn any_success_status_is_accepted() -> Result<()> {
    let mut storage = MemoryStorage::new();
    let mut fetcher = MockFetcher::new();
    fetcher.set_response(ENDPOINT, 203, FEED);

    assert_eq!(loader().load(&mut storage, &mut fetcher)?.len(), 2);
    assert_eq!(storage.get_item("products").as_deref(), Some(FEED));
    Ok(())
}

#[test]
fn malformed_payload_degrades_and_is_not_cached() -> Result<()> {
    for body in ["not json", "{}", r#"[{"id":"1"}]"#] {
        let mut storage = MemoryStorage::new();
        let mut fetcher = MockFetcher::new();
        fetcher.set_json(ENDPOINT, body);

        assert!(loader().load(&mut storage, &mut fetcher)?.is_empty(), "{body}");
        assert_eq!(storage.get_item("products"), None, "{body}");
    }
    Ok(())
}

#[test]
fn cache_write_failure_degrades_to_empty_list() -> Result<()> {
    let mut storage = MemoryStorage::new();
    storage.set_fail_writes(true);
    let mut fetcher = MockFetcher::new();
    fetcher.set_json(ENDPOINT, FEED);
    let mut loader = loader();

    assert!(loader.load(&mut storage, &mut fetcher)?.is_empty());
    assert_eq!(loader.last_outcome(), Some(LoadOutcome::Degraded));
    Ok(())
}

#[test]
fn corrupt_cache_is_an_error() {
    let mut storage = MemoryStorage::with_items([("products", "{not json")]);
    let mut fetcher = MockFetcher::new();
    fetcher.set_json(ENDPOINT, FEED);

    let err = loader()
        .load(&mut storage, &mut fetcher)
        .expect_err("cache is corrupt");
    assert!(matches!(err, Error::CorruptCache { ref key, .. } if key == "products"));
    assert_eq!(fetcher.call_count(), 0);
}

#[test]
fn load_products_uses_configured_endpoint_and_key() -> Result<()> {
    let config = CarouselConfig {
        endpoint: "https://feed.test/other.json".into(),
        products_key: "carousel-products".into(),
        ..CarouselConfig::default()
    };
    let mut storage = MemoryStorage::new();
    let mut fetcher = MockFetcher::new();
    fetcher.set_json("https://feed.test/other.json", FEED);

    let products = load_products(&mut storage, &mut fetcher, &config)?;
    assert_eq!(products.len(), 2);
    assert_eq!(storage.get_item("carousel-products").as_deref(), Some(FEED));
    assert_eq!(storage.get_item("products"), None);
    Ok(())
}

#[test]
fn numeric_ids_are_read_as_text() -> Result<()> {
    let mut storage = MemoryStorage::with_items([(
        "products",
        r#"[{"id": 42, "name": "Desk", "price": 1999, "img": "i", "url": "u"}]"#,
    )]);
    let mut fetcher = MockFetcher::new();

    let products = loader().load(&mut storage, &mut fetcher)?;
    assert_eq!(products[0].id, "42");
    Ok(())
}
