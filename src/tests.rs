use super::*;

const CARD_PAGE: &str = r#"
    <div class='product-card' data-url='/p/1' data-id='1'>
      <h3 class='product-name'>Lamp</h3>
      <button class='favorite-button'>fav</button>
    </div>
    "#;

fn strip_page(card_count: usize) -> String {
    let cards = (0..card_count)
        .map(|i| format!("<div class='product-card' data-id='{i}'></div>"))
        .collect::<String>();
    format!(
        "<div class='carousel'><div class='carousel-inner'>{cards}</div>\
         <button class='carousel-prev'>prev</button>\
         <button class='carousel-next'>next</button></div>"
    )
}

fn bind_strip(page: &mut Page) -> Result<()> {
    for (selector, direction) in [
        (".carousel-prev", ScrollDirection::Prev),
        (".carousel-next", ScrollDirection::Next),
    ] {
        page.add_listener(
            selector,
            "click",
            ListenerOptions::default(),
            Handler::ScrollStrip {
                scope: ".carousel".into(),
                strip: ".carousel-inner".into(),
                item: ".product-card".into(),
                direction,
                items_per_view: 6.5,
                gap_px: 10.0,
            },
        )?;
    }
    Ok(())
}

fn lamp() -> Product {
    Product {
        id: "1".into(),
        name: "Lamp".into(),
        price: 120.0,
        img: "https://cdn.test/1.png".into(),
        url: "https://shop.test/p/1".into(),
    }
}

#[test]
fn parser_builds_html_head_body_skeleton() -> Result<()> {
    let page = Page::from_html("<title>Shop</title><div class='product-detail'></div>")?;
    assert_eq!(
        page.to_html(),
        r#"<html><head><title>Shop</title></head><body><div class="product-detail"></div></body></html>"#
    );
    Ok(())
}

#[test]
fn parser_keeps_existing_document_structure() -> Result<()> {
    let page = Page::from_html(
        "<!DOCTYPE html><html><head><meta charset='utf-8'></head><body><p id='x'>hi</p></body></html>",
    )?;
    assert_eq!(page.count("head > meta")?, 1);
    assert_eq!(page.count("body > p")?, 1);
    page.assert_text("#x", "hi")?;
    Ok(())
}

#[test]
fn parser_decodes_character_references() -> Result<()> {
    let page = Page::from_html("<p id='t'>Tom &amp; Jerry &#x2764; &unknown;</p>")?;
    page.assert_text("#t", "Tom & Jerry \u{2764} &unknown;")?;

    let page = Page::from_html("<a id='l' href='/p?a=1&amp;b=2'>x</a>")?;
    assert_eq!(page.attr("#l", "href")?.as_deref(), Some("/p?a=1&b=2"));
    Ok(())
}

#[test]
fn parser_reads_script_and_style_bodies_as_raw_text() -> Result<()> {
    let page = Page::from_html(
        r#"<style id='s'>.a > .b { color: red; }</style><script id='js'>if (a < b) { x = "</div>"; }</script><p id='after'>ok</p>"#,
    )?;
    page.assert_text("#s", ".a > .b { color: red; }")?;
    page.assert_text("#js", r#"if (a < b) { x = "</div>"; }"#)?;
    page.assert_text("#after", "ok")?;
    assert_eq!(page.count("head > style")?, 1);
    Ok(())
}

#[test]
fn parser_handles_void_and_self_closing_elements() -> Result<()> {
    let page = Page::from_html("<div id='box'><img src='a.png'><br/><span>t</span></div>")?;
    assert_eq!(
        page.dump_dom("#box")?,
        r#"<div id="box"><img src="a.png"><br><span>t</span></div>"#
    );
    Ok(())
}

#[test]
fn parser_drops_stray_end_tags_and_comments() -> Result<()> {
    let page = Page::from_html("<div id='a'></span><!-- note --><p id='b'>x</p></div>")?;
    assert_eq!(page.count("#a > p")?, 1);
    assert!(!page.to_html().contains("note"));
    Ok(())
}

#[test]
fn parser_rejects_unclosed_comment() {
    let err = Page::from_html("<div><!-- open").expect_err("comment is never closed");
    assert!(matches!(err, Error::HtmlParse(_)));
}

#[test]
fn parser_skips_non_ascii_junk_inside_tags() -> Result<()> {
    let page = Page::from_html(
        "<html><body><div class='product-detail' é data-x=ü/ß><p id='in'>Çay</p></div></body></html>",
    )?;
    assert_eq!(page.count(".product-detail > p")?, 1);
    page.assert_text("#in", "Çay")?;
    Ok(())
}

#[test]
fn parser_keeps_bare_less_than_as_text() -> Result<()> {
    let page = Page::from_html("<p id='x'>1 < 2</p><p id='y'>a <3 b <</p>")?;
    page.assert_text("#x", "1 < 2")?;
    page.assert_text("#y", "a <3 b <")?;
    assert_eq!(page.count("p")?, 2);
    assert_eq!(page.dump_dom("#x")?, r#"<p id="x">1 &lt; 2</p>"#);
    Ok(())
}

#[test]
fn selector_attribute_operators_match() -> Result<()> {
    let page = Page::from_html(
        r#"
        <ul id='list'>
          <li class='item first' data-kind='fruit-apple'>A</li>
          <li class='item' data-kind='veg-carrot'>B</li>
          <li class='item last' data-kind='fruit-pear'>C</li>
        </ul>
        "#,
    )?;
    assert_eq!(page.count("li[data-kind]")?, 3);
    assert_eq!(page.count("li[data-kind='veg-carrot']")?, 1);
    assert_eq!(page.count("li[data-kind^='fruit']")?, 2);
    assert_eq!(page.count("li[data-kind$=carrot]")?, 1);
    assert_eq!(page.count("li[data-kind*='-']")?, 3);
    assert_eq!(page.count("li[class~='last']")?, 1);
    Ok(())
}

#[test]
fn selector_combinators_groups_and_pseudo_classes_match() -> Result<()> {
    let page = Page::from_html(
        r#"
        <ul id='list'>
          <li class='item first'>A</li>
          <li class='item'>B</li>
          <li class='item last'>C</li>
        </ul>
        "#,
    )?;
    assert_eq!(page.count("#list > li.item:not(.first)")?, 2);
    assert_eq!(page.count("body li")?, 3);
    assert_eq!(page.count("body > li")?, 0);
    page.assert_text("li.first + li", "B")?;
    assert_eq!(page.count("li.first ~ li")?, 2);
    page.assert_text("ul li:last-child", "C")?;
    page.assert_text("li:first-child", "A")?;
    assert_eq!(page.count("li.first, li.last, li.first")?, 2);
    assert_eq!(page.count("*")?, 7);
    assert!(page.matches("li.last", "ul > li")?);
    assert!(!page.matches("li.last", ":first-child")?);
    Ok(())
}

#[test]
fn selector_rejects_malformed_input() -> Result<()> {
    let page = Page::from_html("<p>x</p>")?;
    for selector in ["li[", "> li", "li >", "", "a,,b", "p:hover"] {
        let err = page.count(selector).expect_err(selector);
        assert!(
            matches!(err, Error::UnsupportedSelector(_)),
            "{selector}: {err:?}"
        );
    }
    Ok(())
}

#[test]
fn dom_class_list_and_closest() -> Result<()> {
    let mut dom = Dom::new();
    let root = dom.root;
    let card = dom.append_element(root, "div", &[("class", "product-card"), ("data-id", "9")]);
    let button = dom.append_element(card, "button", &[("class", "favorite-button")]);

    dom.class_set(button, "favorited", true)?;
    dom.class_set(button, "favorited", true)?;
    assert_eq!(dom.attr(button, "class").as_deref(), Some("favorite-button favorited"));
    dom.class_set(button, "favorited", false)?;
    assert!(!dom.class_contains(button, "favorited")?);
    dom.class_set(button, "favorite-button", false)?;
    assert_eq!(dom.attr(button, "class"), None);

    assert_eq!(dom.closest(button, ".product-card")?, Some(card));
    assert_eq!(dom.closest(button, "button")?, Some(button));
    assert_eq!(dom.closest(card, ".missing")?, None);
    Ok(())
}

#[test]
fn dom_append_child_rejects_cycles() -> Result<()> {
    let mut dom = Dom::new();
    let root = dom.root;
    let outer = dom.append_element(root, "div", &[]);
    let inner = dom.append_element(outer, "div", &[]);

    let err = dom.append_child(inner, outer).expect_err("outer contains inner");
    assert!(matches!(err, Error::HtmlParse(_)));
    assert!(dom.append_child(outer, outer).is_err());
    assert!(dom.append_child(outer, root).is_err());
    Ok(())
}

#[test]
fn dom_serialization_escapes_text_and_attributes() -> Result<()> {
    let mut dom = Dom::new();
    let root = dom.root;
    let node = dom.append_element(root, "p", &[("title", "a \"b\" & <c>")]);
    dom.create_text(node, "1 < 2 & 3 > 2".into());
    assert_eq!(
        dom.outer_html(node)?,
        r#"<p title="a &quot;b&quot; &amp; &lt;c&gt;">1 &lt; 2 &amp; 3 &gt; 2</p>"#
    );
    assert!(dom.outer_html(root).is_err());
    Ok(())
}

#[test]
fn click_bubbles_to_card_navigation() -> Result<()> {
    let mut page = Page::from_html_with_url("https://shop.test/list", CARD_PAGE)?;
    page.add_listener(
        ".product-card",
        "click",
        ListenerOptions::default(),
        Handler::NavigateToAttr {
            attr: "data-url".into(),
        },
    )?;

    let interactions = page.click(".product-name")?;
    assert_eq!(
        interactions,
        vec![Interaction::Navigate {
            url: "https://shop.test/p/1".into()
        }]
    );
    assert_eq!(page.document_url(), "https://shop.test/p/1");
    assert_eq!(
        page.take_location_navigations(),
        vec![LocationNavigation {
            from: "https://shop.test/list".into(),
            to: "https://shop.test/p/1".into(),
        }]
    );
    assert!(page.take_location_navigations().is_empty());
    Ok(())
}

#[test]
fn stop_propagation_keeps_click_off_the_card() -> Result<()> {
    let mut page = Page::from_html_with_url("https://shop.test/list", CARD_PAGE)?;
    page.add_listener(
        ".product-card",
        "click",
        ListenerOptions::default(),
        Handler::NavigateToAttr {
            attr: "data-url".into(),
        },
    )?;
    page.add_listener(
        ".favorite-button",
        "click",
        ListenerOptions {
            capture: false,
            stop_propagation: true,
        },
        Handler::ToggleFavorite {
            owner: ".product-card".into(),
            id_attr: "data-id".into(),
        },
    )?;

    let interactions = page.click(".favorite-button")?;
    assert_eq!(
        interactions,
        vec![Interaction::ToggleFavorite {
            product_id: "1".into()
        }]
    );
    assert!(page.take_location_navigations().is_empty());
    assert_eq!(page.document_url(), "https://shop.test/list");
    Ok(())
}

#[test]
fn capture_listeners_run_before_target_listeners() -> Result<()> {
    let mut page = Page::from_html_with_url("https://shop.test/", CARD_PAGE)?;
    page.add_listener(
        ".product-card",
        "click",
        ListenerOptions {
            capture: true,
            stop_propagation: false,
        },
        Handler::NavigateToAttr {
            attr: "data-url".into(),
        },
    )?;
    page.add_listener(
        ".favorite-button",
        "click",
        ListenerOptions {
            capture: false,
            stop_propagation: true,
        },
        Handler::ToggleFavorite {
            owner: ".product-card".into(),
            id_attr: "data-id".into(),
        },
    )?;

    let interactions = page.click(".favorite-button")?;
    assert_eq!(interactions.len(), 2);
    assert!(matches!(interactions[0], Interaction::Navigate { .. }));
    assert!(matches!(interactions[1], Interaction::ToggleFavorite { .. }));
    Ok(())
}

#[test]
fn duplicate_listeners_are_registered_once() -> Result<()> {
    let mut page = Page::from_html(CARD_PAGE)?;
    let handler = Handler::NavigateToAttr {
        attr: "data-url".into(),
    };
    page.add_listener(".product-card", "click", ListenerOptions::default(), handler.clone())?;
    page.add_listener(".product-card", "click", ListenerOptions::default(), handler)?;
    assert_eq!(page.listener_count(".product-card", "click")?, 1);
    assert_eq!(page.listener_count(".product-card", "keydown")?, 0);
    Ok(())
}

#[test]
fn navigation_without_attribute_is_skipped() -> Result<()> {
    let mut page = Page::from_html("<div class='product-card'>x</div>")?;
    page.add_listener(
        ".product-card",
        "click",
        ListenerOptions::default(),
        Handler::NavigateToAttr {
            attr: "data-url".into(),
        },
    )?;
    assert!(page.click(".product-card")?.is_empty());
    assert!(page.take_location_navigations().is_empty());
    Ok(())
}

#[test]
fn navigation_resolves_against_document_url() -> Result<()> {
    let page = Page::from_html_with_url("https://shop.test/list/a", "<p>x</p>")?;
    assert_eq!(page.resolve_location_target_url("../p/2"), "https://shop.test/p/2");
    assert_eq!(
        page.resolve_location_target_url("https://other.test/x"),
        "https://other.test/x"
    );

    let blank = Page::from_html("<p>x</p>")?;
    assert_eq!(
        blank.resolve_location_target_url("https://shop.test/p/2"),
        "https://shop.test/p/2"
    );
    assert_eq!(blank.resolve_location_target_url("/p/2"), "/p/2");
    Ok(())
}

#[test]
fn favorite_toggle_without_owner_card_fails() -> Result<()> {
    let mut page = Page::from_html("<button class='favorite-button'>x</button>")?;
    page.add_listener(
        ".favorite-button",
        "click",
        ListenerOptions::default(),
        Handler::ToggleFavorite {
            owner: ".product-card".into(),
            id_attr: "data-id".into(),
        },
    )?;
    let err = page.click(".favorite-button").expect_err("no owning card");
    assert!(matches!(err, Error::SelectorNotFound(_)));
    Ok(())
}

#[test]
fn next_scrolls_by_width_over_cards_per_view() -> Result<()> {
    let mut page = Page::from_html(&strip_page(13))?;
    bind_strip(&mut page)?;
    page.set_offset_width(".carousel-inner", 650.0)?;

    let interactions = page.click(".carousel-next")?;
    assert_eq!(
        interactions,
        vec![Interaction::Scroll {
            direction: ScrollDirection::Next,
            scroll_left: 100.0
        }]
    );
    assert_eq!(page.scroll_left(".carousel-inner")?, 100.0);

    page.click(".carousel-prev")?;
    assert_eq!(page.scroll_left(".carousel-inner")?, 0.0);
    Ok(())
}

#[test]
fn scrolling_is_clamped_to_the_strip() -> Result<()> {
    let mut page = Page::from_html(&strip_page(13))?;
    bind_strip(&mut page)?;
    page.set_offset_width(".carousel-inner", 650.0)?;

    page.click(".carousel-prev")?;
    assert_eq!(page.scroll_left(".carousel-inner")?, 0.0);

    // 13 cards of 100px plus 12 gaps of 10px, minus the 650px viewport.
    for _ in 0..10 {
        page.click(".carousel-next")?;
    }
    assert_eq!(page.scroll_left(".carousel-inner")?, 770.0);
    Ok(())
}

#[test]
fn short_strip_does_not_scroll() -> Result<()> {
    let mut page = Page::from_html(&strip_page(3))?;
    bind_strip(&mut page)?;
    page.click(".carousel-next")?;
    assert_eq!(page.scroll_left(".carousel-inner")?, 0.0);
    assert_eq!(page.offset_width(".carousel-inner")?, 1280.0);
    Ok(())
}

#[test]
fn offset_width_must_be_finite_and_non_negative() -> Result<()> {
    let mut page = Page::from_html(&strip_page(1))?;
    assert!(page.set_offset_width(".carousel-inner", -1.0).is_err());
    assert!(page.set_default_offset_width(f64::NAN).is_err());
    page.set_default_offset_width(300.0)?;
    assert_eq!(page.offset_width(".carousel-inner")?, 300.0);
    Ok(())
}

#[test]
fn trace_logs_capture_events_when_enabled() -> Result<()> {
    let mut page = Page::from_html(CARD_PAGE)?;
    page.add_listener(
        ".product-card",
        "click",
        ListenerOptions::default(),
        Handler::NavigateToAttr {
            attr: "data-url".into(),
        },
    )?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.click(".favorite-button")?;

    let logs = page.take_trace_logs();
    assert!(logs.iter().any(|line| line.contains("[event] click")));
    assert!(logs.iter().any(|line| line.contains("phase=bubble")));
    assert!(logs.iter().any(|line| line.contains("[event] done click")));
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}

#[test]
fn trace_events_can_be_disabled() -> Result<()> {
    let mut page = Page::from_html(CARD_PAGE)?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.set_trace_events(false);
    page.click(".favorite-button")?;
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}

#[test]
fn trace_log_limit_keeps_latest_entries() -> Result<()> {
    let mut page = Page::from_html(CARD_PAGE)?;
    assert!(page.set_trace_log_limit(0).is_err());
    page.set_trace_log_limit(2)?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.click(".favorite-button")?;
    page.click(".product-name")?;

    let logs = page.take_trace_logs();
    assert_eq!(logs.len(), 2);
    assert!(logs[1].contains("done click"));
    Ok(())
}

#[test]
fn assertion_failures_carry_a_dom_snippet() -> Result<()> {
    let page = Page::from_html(CARD_PAGE)?;
    let err = page
        .assert_text(".product-name", "Chair")
        .expect_err("text differs");
    match err {
        Error::AssertionFailed {
            selector,
            expected,
            actual,
            dom_snippet,
        } => {
            assert_eq!(selector, ".product-name");
            assert_eq!(expected, "Chair");
            assert_eq!(actual, "Lamp");
            assert!(dom_snippet.contains("product-name"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(page.assert_has_class(".favorite-button", "favorited", true).is_err());
    page.assert_has_class(".favorite-button", "favorited", false)?;
    page.assert_attr(".product-card", "data-id", Some("1"))?;
    page.assert_attr(".product-card", "data-missing", None)?;
    page.assert_count(".product-card", 1)?;
    assert!(page.assert_count(".product-card", 2).is_err());
    assert!(matches!(
        page.assert_exists(".missing"),
        Err(Error::SelectorNotFound(_))
    ));
    Ok(())
}

#[test]
fn product_ids_accept_strings_and_numbers() -> Result<()> {
    let products = parse_products(
        r#"[
            {"id":"a-1","name":"A","price":10,"img":"i","url":"u"},
            {"id":7,"name":"B","price":12.5,"img":"i","url":"u"},
            {"id":1.5,"name":"C","price":0,"img":"i","url":"u"}
        ]"#,
    )?;
    let ids = products.iter().map(|p| p.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, ["a-1", "7", "1.5"]);
    assert_eq!(products[0].price_label("TL"), "10 TL");
    assert_eq!(products[1].price_label("TL"), "12.5 TL");
    assert_eq!(products[2].price_label("TL"), "0 TL");
    Ok(())
}

#[test]
fn product_payload_errors_are_reported() {
    for raw in [
        "{}",
        "[{\"id\":true,\"name\":\"A\",\"price\":1,\"img\":\"i\",\"url\":\"u\"}]",
        "[{\"id\":\"1\"}]",
        "not json",
    ] {
        assert!(matches!(parse_products(raw), Err(Error::Payload(_))), "{raw}");
    }
}

#[test]
fn product_names_are_nfc_normalized() {
    let product = Product {
        name: "Cafe\u{301} Lamba".into(),
        ..lamp()
    };
    assert_eq!(product.display_name(), "Caf\u{e9} Lamba");
}

#[test]
fn negative_zero_price_renders_as_zero() {
    let product = Product {
        price: -0.0,
        ..lamp()
    };
    assert_eq!(product.price_label("TL"), "0 TL");
}

#[test]
fn render_markup_produces_carousel_structure() {
    let markup = render_markup(&[lamp()], &CarouselConfig::default());
    assert_eq!(
        markup,
        concat!(
            r#"<div class="carousel">"#,
            r#"<h2 class="carousel-title">Beğenebileceğiniz Ürünler</h2>"#,
            r#"<div class="carousel-inner">"#,
            r#"<div class="product-card" data-id="1" data-url="https://shop.test/p/1">"#,
            r#"<img alt="Lamp" class="product-image" src="https://cdn.test/1.png">"#,
            r#"<h3 class="product-name">Lamp</h3>"#,
            r#"<p class="product-price">120 TL</p>"#,
            "<button class=\"favorite-button\">\u{2764}\u{fe0e}</button>",
            "</div></div>",
            "<button class=\"carousel-prev\">\u{2190}</button>",
            "<button class=\"carousel-next\">\u{2192}</button>",
            "</div>"
        )
    );
}

#[test]
fn render_markup_escapes_product_fields() {
    let product = Product {
        name: "<b>Lamp</b> & \"Shade\"".into(),
        ..lamp()
    };
    let markup = render_markup(&[product], &CarouselConfig::default());
    assert!(markup.contains(r#"alt="&lt;b&gt;Lamp&lt;/b&gt; &amp; &quot;Shade&quot;""#));
    assert!(markup.contains("&lt;b&gt;Lamp&lt;/b&gt; &amp; \"Shade\"</h3>"));
}

#[test]
fn render_markup_without_products_keeps_controls() {
    let markup = render_markup(&[], &CarouselConfig::default());
    assert!(markup.contains(r#"<div class="carousel-inner"></div>"#));
    assert!(markup.contains("carousel-prev"));
    assert!(markup.contains("carousel-next"));
}

#[test]
fn config_defaults_and_validation() -> Result<()> {
    let config = CarouselConfig::default();
    assert_eq!(config.endpoint, DEFAULT_PRODUCTS_ENDPOINT);
    assert_eq!(config.cards_per_view, 6.5);
    config.validate()?;

    let config = CarouselConfig::from_json(r#"{"title":"Similar","cards_per_view":4}"#)?;
    assert_eq!(config.title, "Similar");
    assert_eq!(config.cards_per_view, 4.0);
    assert_eq!(config.products_key, DEFAULT_PRODUCTS_KEY);

    for raw in [
        r#"{"cards_per_view":0}"#,
        r#"{"card_gap_px":-1}"#,
        r#"{"products_key":"same","favorites_key":"same"}"#,
        r#"{"mount_selector":"div["}"#,
        r#"{"endpoint":" "}"#,
        r#"{"http_timeout_ms":0}"#,
        r#"{"title":5}"#,
    ] {
        assert!(CarouselConfig::from_json(raw).is_err(), "{raw}");
    }
    Ok(())
}

#[test]
fn config_setters_reject_invalid_values_and_keep_previous() -> Result<()> {
    let mut config = CarouselConfig::default();
    assert!(config.set_cards_per_view(f64::INFINITY).is_err());
    assert_eq!(config.cards_per_view, DEFAULT_CARDS_PER_VIEW);
    config.set_cards_per_view(4.0)?;
    assert_eq!(config.cards_per_view, 4.0);

    assert!(config.set_card_gap_px(-2.0).is_err());
    assert_eq!(config.card_gap_px, DEFAULT_CARD_GAP_PX);

    assert!(config.set_mount_selector("#main >").is_err());
    assert_eq!(config.mount_selector, DEFAULT_MOUNT_SELECTOR);
    config.set_mount_selector("#main")?;
    assert_eq!(config.mount_selector, "#main");
    Ok(())
}
