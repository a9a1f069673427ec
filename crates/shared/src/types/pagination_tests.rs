use super::*;

#[test]
fn test_page_request_default() {
    let request = PageRequest::default();
    assert_eq!(request.page(), 1);
    assert_eq!(request.limit(), 10);
}

#[test]
fn test_page_request_offset() {
    assert_eq!(PageRequest::new(1, 20).offset(), 0);
    assert_eq!(PageRequest::new(2, 20).offset(), 20);
    assert_eq!(PageRequest::new(4, 5).offset(), 15);
}

#[test]
fn test_from_raw_parses_numbers() {
    let request = PageRequest::from_raw(Some("3"), Some("25"));
    assert_eq!(request, PageRequest::new(3, 25));
    assert_eq!(request.limit(), 25);
}

#[test]
fn test_from_raw_falls_back_to_defaults() {
    let defaults = PageRequest::default();
    assert_eq!(PageRequest::from_raw(None, None), defaults);
    assert_eq!(PageRequest::from_raw(Some("abc"), Some("")), defaults);
    assert_eq!(PageRequest::from_raw(Some("0"), Some("0")), defaults);
    assert_eq!(PageRequest::from_raw(Some("-2"), Some("-10")), defaults);
    assert_eq!(PageRequest::from_raw(Some("1.5"), Some("ten")), defaults);
}

#[test]
fn test_huge_values_are_capped_to_bigint_range() {
    let request = PageRequest::from_raw(Some("1"), Some("10000000000000000000"));
    assert_eq!(request.limit(), MAX_PAGE_VALUE);
    assert_eq!(request.offset(), 0);

    let request = PageRequest::from_raw(Some("3"), Some("9223372036854775807"));
    assert_eq!(request.page(), 3);
    assert_eq!(request.offset(), MAX_PAGE_VALUE);

    let request = PageRequest::new(u64::MAX, u64::MAX);
    assert_eq!(request.page(), MAX_PAGE_VALUE);
    assert!(i64::try_from(request.offset()).is_ok());
    assert!(i64::try_from(request.limit()).is_ok());
}

#[test]
fn test_page_meta_with_huge_limit() {
    let meta = PageMeta::new(PageRequest::from_raw(None, Some("18446744073709551615")), 5);
    assert_eq!(meta.total_pages, 1);
    assert!(!meta.has_next);
}

#[test]
fn test_page_meta_total_pages_rounds_up() {
    // 25 items, 10 per page -> 3 pages
    let meta = PageMeta::new(PageRequest::new(1, 10), 25);
    assert_eq!(meta.total_pages, 3);
    assert!(meta.has_next);
    assert!(!meta.has_prev);
}

#[test]
fn test_page_meta_last_page() {
    let meta = PageMeta::new(PageRequest::new(3, 10), 25);
    assert!(!meta.has_next);
    assert!(meta.has_prev);
}

#[test]
fn test_page_meta_empty() {
    let meta = PageMeta::new(PageRequest::default(), 0);
    assert_eq!(meta.total, 0);
    assert_eq!(meta.total_pages, 0);
    assert!(!meta.has_next);
    assert!(!meta.has_prev);
}

#[test]
fn test_page_meta_beyond_last_page() {
    let meta = PageMeta::new(PageRequest::new(9, 10), 25);
    assert_eq!(meta.page, 9);
    assert_eq!(meta.total, 25);
    assert!(!meta.has_next);
    assert!(meta.has_prev);
}

#[test]
fn test_page_meta_serializes_camel_case() {
    let meta = PageMeta::new(PageRequest::new(2, 10), 11);
    let json = serde_json::to_value(meta).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "total": 11,
            "page": 2,
            "totalPages": 2,
            "hasNext": false,
            "hasPrev": true
        })
    );
}

#[test]
fn test_page_response_map_keeps_meta() {
    let response = PageResponse::new(vec![1, 2, 3], PageRequest::new(1, 3), 7);
    let mapped = response.map(|n| n * 10);
    assert_eq!(mapped.items, vec![10, 20, 30]);
    assert_eq!(mapped.pagination.total_pages, 3);
}

#[test]
fn test_zero_limit_cannot_reach_page_meta() {
    let request = PageRequest::new(1, 0);
    assert_eq!(request.limit(), DEFAULT_LIMIT);

    let meta = PageMeta::new(request, 3);
    assert_eq!(meta.total_pages, 1);
}
