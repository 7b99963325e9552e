//! Tests for endpoint parameter and response types

use super::*;
use crate::pagination::Page;
use crate::types::{ParamValue, QueryParams};
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use serde_json::json;

fn str_param(params: &QueryParams, key: &str) -> Option<String> {
    params.get(key).map(ToString::to_string)
}

// ============================================================================
// Parameter Tests
// ============================================================================

#[test]
fn test_item_list_params_serialize() {
    let params = ItemListParams::new(Site::Fanza)
        .service("digital")
        .floor("videoa")
        .keyword("summer")
        .sort(ItemSort::PriceAsc)
        .article(Article::Actress, "1011199")
        .hits(20);

    let query = QueryParams::from_serialize(&params).unwrap();

    assert_eq!(str_param(&query, "site").as_deref(), Some("FANZA"));
    assert_eq!(str_param(&query, "service").as_deref(), Some("digital"));
    assert_eq!(str_param(&query, "sort").as_deref(), Some("-price"));
    assert_eq!(str_param(&query, "article").as_deref(), Some("actress"));
    assert_eq!(str_param(&query, "article_id").as_deref(), Some("1011199"));
    assert_eq!(query.get("hits"), Some(&ParamValue::Int(20)));
    assert!(query.get("offset").is_none());
    assert!(query.get("cid").is_none());
    assert_eq!(query.len(), 8);
}

#[test]
fn test_item_list_date_filters() {
    let from = NaiveDate::from_ymd_opt(2024, 4, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let params = ItemListParams::new(Site::Dmm).released_after(from);

    assert_eq!(params.gte_date.as_deref(), Some("2024-04-01T00:00:00"));
    let query = QueryParams::from_serialize(&params).unwrap();
    assert_eq!(str_param(&query, "site").as_deref(), Some("DMM.com"));
}

#[test]
fn test_with_window_overrides_caller_paging() {
    let params = ItemListParams::new(Site::Fanza).offset(999).hits(3);
    let windowed = params.with_window(101, 100);

    assert_eq!(windowed.offset, Some(101));
    assert_eq!(windowed.hits, Some(100));
    assert_eq!(windowed.site, Site::Fanza);
    assert_eq!(params.offset, Some(999));
}

#[test]
fn test_floor_search_params() {
    let params = GenreSearchParams::new(43).initial("あ");
    let query = QueryParams::from_serialize(&params.with_window(1, 100)).unwrap();

    assert_eq!(query.get("floor_id"), Some(&ParamValue::Int(43)));
    assert_eq!(str_param(&query, "initial").as_deref(), Some("あ"));
    assert_eq!(query.get("offset"), Some(&ParamValue::Int(1)));
    assert_eq!(GenreSearchParams::PATH, "/GenreSearch");
    assert_eq!(MakerSearchParams::PATH, "/MakerSearch");
    assert_eq!(SeriesSearchParams::PATH, "/SeriesSearch");
    assert_eq!(AuthorSearchParams::PATH, "/AuthorSearch");
}

#[test]
fn test_actress_search_params() {
    let params = ActressSearchParams::new()
        .keyword("あさみ")
        .height_between(150, 165)
        .born_between(
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
        )
        .sort(ActressSort::BustDesc);

    let query = QueryParams::from_serialize(&params).unwrap();
    assert_eq!(query.get("gte_height"), Some(&ParamValue::Int(150)));
    assert_eq!(query.get("lte_height"), Some(&ParamValue::Int(165)));
    assert_eq!(str_param(&query, "gte_birthday").as_deref(), Some("1990-01-01"));
    assert_eq!(str_param(&query, "sort").as_deref(), Some("-bust"));
    assert!(query.get("gte_bust").is_none());
}

#[test]
fn test_floor_list_params_are_empty() {
    let query = QueryParams::from_serialize(&FloorListParams::default()).unwrap();
    assert!(query.is_empty());
}

// ============================================================================
// Response Tests
// ============================================================================

#[test]
fn test_item_list_response() {
    let response: ItemListResponse = serde_json::from_value(json!({
        "status": 200,
        "result_count": 1,
        "total_count": 1234,
        "first_position": 1,
        "items": [{
            "service_code": "digital",
            "service_name": "動画",
            "floor_code": "videoa",
            "floor_name": "ビデオ",
            "category_name": "ビデオ (動画)",
            "content_id": "abc00123",
            "product_id": "abc00123",
            "title": "Sample Title",
            "review": {"count": 12, "average": "4.50"},
            "URL": "https://example.com/item",
            "affiliateURL": "https://example.com/item?af=990",
            "imageURL": {"list": "l.jpg", "small": "s.jpg", "large": "L.jpg"},
            "sampleImageURL": {"sample_s": {"image": ["1.jpg", "2.jpg"]}},
            "prices": {
                "price": "300~",
                "deliveries": {"delivery": [{"type": "stream", "price": "300"}]}
            },
            "date": "2024-04-05 10:00:00",
            "iteminfo": {
                "genre": [{"id": 6533, "name": "Genre"}],
                "actress": [{"id": "1011199", "name": "Someone", "ruby": "さむわん"}]
            }
        }]
    }))
    .unwrap();

    assert_eq!(response.total_count(), 1234);
    assert_eq!(response.first_position(), 1);

    let items = response.into_records();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.content_id, "abc00123");
    assert_eq!(item.review.as_ref().unwrap().average, Some(4.5));
    assert_eq!(item.iteminfo.actress[0].id, 1_011_199);
    assert_eq!(
        item.prices.as_ref().unwrap().deliveries.as_ref().unwrap().delivery[0].kind,
        "stream"
    );
    assert_eq!(
        item.release_date(),
        NaiveDateTime::parse_from_str("2024-04-05 10:00:00", "%Y-%m-%d %H:%M:%S").ok()
    );
    assert!(item.iteminfo.series.is_empty());
}

#[test]
fn test_item_list_response_without_items() {
    let response: ItemListResponse = serde_json::from_value(json!({
        "result_count": 0,
        "total_count": 0,
        "first_position": 1
    }))
    .unwrap();

    assert!(response.items.is_empty());
    assert_eq!(response.status, None);
}

#[test]
fn test_actress_search_response_with_string_counts() {
    let response: ActressSearchResponse = serde_json::from_value(json!({
        "status": "200",
        "result_count": "1",
        "total_count": "52",
        "first_position": "11",
        "actress": [{
            "id": "1011199",
            "name": "Someone",
            "ruby": "さむわん",
            "bust": "88",
            "cup": "E",
            "waist": "58",
            "hip": "",
            "height": null,
            "birthday": "1995-03-14",
            "imageURL": {"small": "s.jpg", "large": "l.jpg"}
        }]
    }))
    .unwrap();

    assert_eq!(response.status, Some(200));
    assert_eq!(response.total_count(), 52);
    assert_eq!(response.first_position(), 11);

    let actress = &response.actress[0];
    assert_eq!(actress.id, 1_011_199);
    assert_eq!(actress.bust, Some(88));
    assert_eq!(actress.hip, None);
    assert_eq!(actress.height, None);
    assert_eq!(actress.birth_date(), NaiveDate::from_ymd_opt(1995, 3, 14));
}

#[test]
fn test_genre_search_response_keeps_floor_header() {
    let response: GenreSearchResponse = serde_json::from_value(json!({
        "status": "200",
        "result_count": 2,
        "total_count": "2",
        "first_position": 1,
        "site_name": "FANZA",
        "site_code": "FANZA",
        "service_name": "動画",
        "service_code": "digital",
        "floor_id": "43",
        "floor_name": "ビデオ",
        "floor_code": "videoa",
        "genre": [
            {"genre_id": "2001", "name": "A", "ruby": "あ", "list_url": "https://example.com/a"},
            {"genre_id": 2002, "name": "B"}
        ]
    }))
    .unwrap();

    assert_eq!(response.floor.floor_id.as_deref(), Some("43"));
    assert_eq!(response.floor.service_code.as_deref(), Some("digital"));
    let genres = response.into_records();
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[1].genre_id, 2002);
}

#[test]
fn test_author_search_response() {
    let response: AuthorSearchResponse = serde_json::from_value(json!({
        "result_count": 1,
        "total_count": 1,
        "first_position": 1,
        "author": [{"author_id": "100", "name": "Writer", "another_name": "Pen Name"}]
    }))
    .unwrap();

    assert_eq!(response.author[0].another_name.as_deref(), Some("Pen Name"));
}

#[test]
fn test_floor_list_find_floor() {
    let response: FloorListResponse = serde_json::from_value(json!({
        "site": [{
            "name": "FANZA",
            "code": "FANZA",
            "service": [{
                "name": "動画",
                "code": "digital",
                "floor": [
                    {"id": "43", "name": "ビデオ", "code": "videoa"},
                    {"id": "44", "name": "素人", "code": "videoc"}
                ]
            }]
        }]
    }))
    .unwrap();

    assert_eq!(response.find_floor("44").map(|f| f.code.as_str()), Some("videoc"));
    assert!(response.find_floor("99").is_none());
}
