use serde_json::Value;

/// Shape every list item must have, whichever prefix served it.
pub fn assert_summary_shape(item: &Value) {
    for field in ["id", "title", "summary", "publishedAt", "updatedAt", "url"] {
        assert!(
            item.get(field).and_then(|v| v.as_str()).is_some(),
            "Missing string field '{}' in {}",
            field,
            item
        );
    }

    let url = item["url"].as_str().unwrap();
    assert!(url.starts_with("/articles/") && url.ends_with(".html"));

    if let Some(image) = item.get("image") {
        let src = image.get("src").and_then(|v| v.as_str()).expect("Missing image src");
        assert!(src.starts_with("https://"), "image src not absolute: {}", src);
        assert!(image.get("alt").is_some());
    }
}

pub fn assert_page_envelope(body: &Value) {
    for field in ["page", "perPage", "totalPages", "total"] {
        assert!(
            body.get(field).and_then(|v| v.as_u64()).is_some(),
            "Missing numeric field '{}'",
            field
        );
    }
    assert!(body["items"].is_array());
}
