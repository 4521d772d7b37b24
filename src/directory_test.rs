use super::mock::MockProfilesSource;
use super::*;
use serde_json::{json, Value};

/// 新しい順に並んだ `count` 件の行
fn recent_rows(count: usize) -> Value {
    let rows: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": format!("u{}", i),
                "handle": format!("user{}", i),
                "display_name": format!("User {}", i),
                "avatar_url": "",
                "created_at": format!("2024-05-{:02}T00:00:00+00:00", 28 - i),
            })
        })
        .collect();
    Value::Array(rows)
}

fn ids(listing: &CreatorListing) -> Vec<&str> {
    listing.creators.iter().map(|c| c.id.as_str()).collect()
}

// =========================================================================
// safe_limit / fetch_size tests
// =========================================================================

#[test]
fn test_safe_limit_defaults_to_six() {
    assert_eq!(safe_limit(None), 6);
    assert_eq!(safe_limit(Some(f64::NAN)), 6);
    assert_eq!(safe_limit(Some(0.0)), 6);
}

#[test]
fn test_safe_limit_clamps_to_range() {
    assert_eq!(safe_limit(Some(-4.0)), 1);
    assert_eq!(safe_limit(Some(0.5)), 1);
    assert_eq!(safe_limit(Some(31.0)), 30);
    assert_eq!(safe_limit(Some(f64::INFINITY)), 30);
    assert_eq!(safe_limit(Some(f64::NEG_INFINITY)), 1);
}

#[test]
fn test_safe_limit_floors_fractions() {
    assert_eq!(safe_limit(Some(3.9)), 3);
}

#[test]
fn test_fetch_size_overfetches_with_floor() {
    assert_eq!(fetch_size(1), 12);
    assert_eq!(fetch_size(4), 12);
    assert_eq!(fetch_size(5), 15);
    assert_eq!(fetch_size(30), 90);
}

// =========================================================================
// CreatorQuery tests
// =========================================================================

#[test]
fn test_exclusion_is_trimmed_and_blank_ignored() {
    assert_eq!(CreatorQuery::new().excluding("  u1 ").exclusion(), Some("u1"));
    assert_eq!(CreatorQuery::new().excluding("   ").exclusion(), None);
    assert_eq!(CreatorQuery::new().exclusion(), None);
}

#[test]
fn test_search_term_is_trimmed_and_lowercased() {
    assert_eq!(
        CreatorQuery::new().with_search("  DoE ").search_term(),
        Some("doe".to_string())
    );
    assert_eq!(CreatorQuery::new().with_search(" ").search_term(), None);
}

// =========================================================================
// profiles_query tests
// =========================================================================

#[test]
fn test_profiles_query_without_exclusion() {
    let query = profiles_query(6, None);

    assert_eq!(query.table(), "profiles");
    assert_eq!(
        query.columns(),
        ["id", "handle", "display_name", "avatar_url", "created_at"]
    );
    assert!(query.filters().is_empty());
    assert_eq!(query.row_limit(), Some(18));
    let order = query.order_by().unwrap();
    assert_eq!(order.column, "created_at");
    assert_eq!(order.direction, Direction::Desc);
}

#[test]
fn test_profiles_query_with_exclusion() {
    let query = profiles_query(2, Some("u9"));

    assert_eq!(
        query.filters(),
        [crate::rest::Filter::Neq {
            column: "id".to_string(),
            value: "u9".to_string(),
        }]
    );
    assert_eq!(query.row_limit(), Some(12));
}

// =========================================================================
// fetch tests
// =========================================================================

#[tokio::test]
async fn test_fetch_returns_most_recent_up_to_limit() {
    let source = Arc::new(MockProfilesSource::from_json(recent_rows(10)));
    let directory = CreatorDirectory::new(source.clone());

    let listing = directory.fetch(&CreatorQuery::new().with_limit(3.0)).await;

    assert!(listing.is_ok());
    assert_eq!(ids(&listing), vec!["u0", "u1", "u2"]);
    assert_eq!(source.queries().len(), 1);
}

#[tokio::test]
async fn test_fetch_defaults_to_six() {
    let directory = CreatorDirectory::new(MockProfilesSource::from_json(recent_rows(20)));

    let listing = directory.fetch(&CreatorQuery::new()).await;

    assert_eq!(listing.creators.len(), 6);
}

#[tokio::test]
async fn test_fetch_keeps_first_duplicate() {
    let directory = CreatorDirectory::new(MockProfilesSource::from_json(json!([
        { "id": "u1", "handle": "newest", "created_at": "2024-05-02T00:00:00Z" },
        { "id": "u1", "handle": "older", "created_at": "2024-05-01T00:00:00Z" },
        { "id": "u2", "handle": "other", "created_at": "2024-04-30T00:00:00Z" },
    ])));

    let listing = directory.fetch(&CreatorQuery::new()).await;

    assert_eq!(ids(&listing), vec!["u1", "u2"]);
    assert_eq!(listing.creators[0].handle, "newest");
}

#[tokio::test]
async fn test_fetch_drops_rows_without_id() {
    let directory = CreatorDirectory::new(MockProfilesSource::from_json(json!([
        { "id": "", "handle": "blank", "created_at": "2024-05-03T00:00:00Z" },
        { "handle": "missing", "created_at": "2024-05-02T00:00:00Z" },
        { "id": "u1", "handle": "kept", "created_at": "2024-05-01T00:00:00Z" },
    ])));

    let listing = directory.fetch(&CreatorQuery::new()).await;

    assert_eq!(ids(&listing), vec!["u1"]);
}

#[tokio::test]
async fn test_fetch_normalizes_handle_and_display_name() {
    let directory = CreatorDirectory::new(MockProfilesSource::from_json(json!([
        { "id": "u1", "handle": "@Jane_Doe", "display_name": "" },
    ])));

    let listing = directory.fetch(&CreatorQuery::new()).await;

    let profile = &listing.creators[0];
    assert_eq!(profile.handle, "jane_doe");
    assert_eq!(profile.display_name, "jane_doe");
}

#[tokio::test]
async fn test_fetch_search_filters_by_name() {
    let directory = CreatorDirectory::new(MockProfilesSource::from_json(json!([
        { "id": "u1", "handle": "jane", "display_name": "Jane Doe", "created_at": "2024-05-02T00:00:00Z" },
        { "id": "u2", "handle": "sam", "display_name": "Sam Lee", "created_at": "2024-05-01T00:00:00Z" },
    ])));

    let listing = directory.fetch(&CreatorQuery::new().with_search("doe")).await;

    assert_eq!(ids(&listing), vec!["u1"]);
}

#[tokio::test]
async fn test_fetch_search_matches_handle_case_insensitively() {
    let directory = CreatorDirectory::new(MockProfilesSource::from_json(json!([
        { "id": "u1", "handle": "@CurATOR", "display_name": "Someone" },
        { "id": "u2", "handle": "reader", "display_name": "Other" },
    ])));

    let listing = directory.fetch(&CreatorQuery::new().with_search("CURATOR")).await;

    assert_eq!(ids(&listing), vec!["u1"]);
}

#[tokio::test]
async fn test_fetch_search_truncates_after_filtering() {
    let rows: Vec<Value> = (0..12)
        .map(|i| {
            let name = if i % 2 == 0 { "Match" } else { "Skip" };
            json!({
                "id": format!("u{:02}", i),
                "display_name": format!("{} {}", name, i),
                "created_at": format!("2024-05-{:02}T00:00:00Z", 28 - i),
            })
        })
        .collect();
    let directory = CreatorDirectory::new(MockProfilesSource::from_json(Value::Array(rows)));

    let listing = directory
        .fetch(&CreatorQuery::new().with_limit(2.0).with_search("match"))
        .await;

    assert_eq!(ids(&listing), vec!["u00", "u02"]);
}

#[tokio::test]
async fn test_fetch_excludes_user() {
    let source = Arc::new(MockProfilesSource::from_json(recent_rows(4)));
    let directory = CreatorDirectory::new(source.clone());

    let listing = directory.fetch(&CreatorQuery::new().excluding(" u0 ")).await;

    assert_eq!(ids(&listing), vec!["u1", "u2", "u3"]);
    let sent = &source.queries()[0];
    assert_eq!(sent.filters().len(), 1);
}

#[tokio::test]
async fn test_fetch_empty_result_is_not_an_error() {
    let directory = CreatorDirectory::new(MockProfilesSource::from_json(recent_rows(3)));

    let listing = directory.fetch(&CreatorQuery::new().with_search("nobody")).await;

    assert!(listing.is_ok());
    assert!(listing.creators.is_empty());
}

#[tokio::test]
async fn test_fetch_failure_returns_empty_list_and_error() {
    let source = Arc::new(MockProfilesSource::failing(503, "upstream down"));
    let directory = CreatorDirectory::new(source.clone());

    let listing = directory.fetch(&CreatorQuery::new().with_limit(3.0)).await;

    assert!(listing.creators.is_empty());
    assert!(matches!(
        listing.error,
        Some(StashError::Api { status: 503, .. })
    ));
    assert_eq!(source.queries().len(), 1, "no retry expected");
}

#[tokio::test]
async fn test_into_result() {
    let ok = CreatorDirectory::new(MockProfilesSource::from_json(recent_rows(1)))
        .fetch(&CreatorQuery::new())
        .await;
    assert_eq!(ok.into_result().unwrap().len(), 1);

    let failed = CreatorDirectory::new(MockProfilesSource::failing(401, "JWT expired"))
        .fetch(&CreatorQuery::new())
        .await;
    assert!(failed.into_result().is_err());
}

#[tokio::test]
async fn test_boxed_dyn_source() {
    let source: Box<dyn ProfilesSource> = Box::new(MockProfilesSource::from_json(recent_rows(2)));
    let directory = CreatorDirectory::new(source);

    let listing = directory.fetch(&CreatorQuery::new()).await;

    assert_eq!(listing.creators.len(), 2);
}

// =========================================================================
// filter_creators tests
// =========================================================================

fn profile(id: &str, name: &str, handle: &str) -> CreatorProfile {
    CreatorProfile {
        id: id.to_string(),
        handle: handle.to_string(),
        display_name: name.to_string(),
        avatar_url: String::new(),
        created_at: None,
    }
}

#[test]
fn test_filter_none_returns_all() {
    let creators = vec![profile("1", "A", "a"), profile("2", "B", "b")];
    assert_eq!(filter_creators(creators, None).len(), 2);
}

#[test]
fn test_filter_spans_name_and_handle_boundary() {
    // "表示名 ハンドル" の連結に対して検索する
    let creators = vec![profile("1", "Jane", "doe"), profile("2", "Jane", "smith")];
    let result = filter_creators(creators, Some("jane doe"));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "1");
}
