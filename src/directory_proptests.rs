use super::mock::MockProfilesSource;
use super::*;
use proptest::prelude::*;
use serde_json::{json, Value};

/// 少数のIDから選ぶ（重複・空IDを頻繁に発生させる）
fn id_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "u[0-7]".prop_map(Value::String),
        Just(Value::String(String::new())),
        Just(Value::Null),
        (0u32..4).prop_map(|n| json!(n)),
    ]
}

/// 先頭に `@` や空白、大文字を含みうるハンドル
fn handle_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[@ ]{0,3}[A-Za-z_][A-Za-z0-9_]{0,8}[ ]{0,2}".prop_map(Value::String),
        Just(Value::Null),
    ]
}

fn name_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[A-Za-z ]{0,12}".prop_map(Value::String),
        Just(Value::Null),
    ]
}

fn row_strategy() -> impl Strategy<Value = Value> {
    (id_strategy(), handle_strategy(), name_strategy(), 0u32..1000).prop_map(
        |(id, handle, name, day)| {
            json!({
                "id": id,
                "handle": handle,
                "display_name": name,
                "created_at": format!("2024-{:04}", day),
            })
        },
    )
}

fn limit_strategy() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), (-10.0f64..50.0).prop_map(Some)]
}

fn run(source: MockProfilesSource, query: &CreatorQuery) -> CreatorListing {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(CreatorDirectory::new(source).fetch(query))
}

proptest! {
    /// 件数は丸めた上限を超えない
    #[test]
    fn prop_length_never_exceeds_safe_limit(
        rows in prop::collection::vec(row_strategy(), 0..60),
        limit in limit_strategy(),
    ) {
        let query = CreatorQuery { limit, ..Default::default() };
        let listing = run(MockProfilesSource::from_json(Value::Array(rows)), &query);

        prop_assert!(listing.is_ok());
        prop_assert!(listing.creators.len() <= safe_limit(limit));
        prop_assert!(listing.creators.len() <= MAX_LIMIT);
    }

    /// IDは一意で空にならない
    #[test]
    fn prop_ids_are_unique_and_non_empty(
        rows in prop::collection::vec(row_strategy(), 0..60),
    ) {
        let query = CreatorQuery::new().with_limit(30.0);
        let listing = run(MockProfilesSource::from_json(Value::Array(rows)), &query);

        let mut seen = HashSet::new();
        for creator in &listing.creators {
            prop_assert!(!creator.id.is_empty());
            prop_assert!(seen.insert(creator.id.clone()), "duplicate id {}", creator.id);
        }
    }

    /// ハンドルは小文字で先頭に `@` を持たない
    #[test]
    fn prop_handles_are_normalized(
        rows in prop::collection::vec(row_strategy(), 0..40),
    ) {
        let listing = run(
            MockProfilesSource::from_json(Value::Array(rows)),
            &CreatorQuery::new().with_limit(30.0),
        );

        for creator in &listing.creators {
            prop_assert!(!creator.handle.starts_with('@'));
            prop_assert_eq!(&creator.handle, &creator.handle.to_lowercase());
            prop_assert!(!creator.display_name.is_empty());
        }
    }

    /// 除外IDは結果に含まれない
    #[test]
    fn prop_excluded_user_is_absent(
        rows in prop::collection::vec(row_strategy(), 0..40),
        excluded in "u[0-7]",
    ) {
        let listing = run(
            MockProfilesSource::from_json(Value::Array(rows)),
            &CreatorQuery::new().with_limit(30.0).excluding(excluded.clone()),
        );

        prop_assert!(listing.creators.iter().all(|c| c.id != excluded));
    }

    /// 検索語は全結果の "表示名 ハンドル" に含まれる
    #[test]
    fn prop_search_results_contain_term(
        rows in prop::collection::vec(row_strategy(), 0..40),
        search in "[A-Za-z]{1,2}",
    ) {
        let listing = run(
            MockProfilesSource::from_json(Value::Array(rows)),
            &CreatorQuery::new().with_limit(30.0).with_search(search.clone()),
        );

        let term = search.to_lowercase();
        for creator in &listing.creators {
            let text = format!("{} {}", creator.display_name, creator.handle).to_lowercase();
            prop_assert!(text.contains(&term), "{:?} does not contain {:?}", text, term);
        }
    }

    /// 失敗時は常に空の一覧とエラー
    #[test]
    fn prop_failure_yields_empty_listing(
        status in 400u16..600,
        limit in limit_strategy(),
    ) {
        let query = CreatorQuery { limit, ..Default::default() };
        let listing = run(MockProfilesSource::failing(status, "failed"), &query);

        prop_assert!(listing.creators.is_empty());
        prop_assert!(listing.error.is_some());
    }
}
