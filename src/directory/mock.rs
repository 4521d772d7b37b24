//! テスト用インメモリ `profiles` テーブル

use super::*;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::RwLock;

/// テスト用データソース
///
/// フィルタ・並び順・件数制限を実テーブルと同様に適用し、受け取ったクエリを記録する。
pub struct MockProfilesSource {
    rows: Vec<RawProfileRow>,
    failure: Option<(u16, String)>,
    queries: RwLock<Vec<TableQuery>>,
}

impl MockProfilesSource {
    pub fn with_rows(rows: Vec<RawProfileRow>) -> Self {
        Self {
            rows,
            failure: None,
            queries: RwLock::new(Vec::new()),
        }
    }

    /// JSON 配列から作成
    pub fn from_json(rows: Value) -> Self {
        Self::with_rows(serde_json::from_value(rows).unwrap())
    }

    /// 常に API エラーを返すソース
    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            rows: Vec::new(),
            failure: Some((status, message.to_string())),
            queries: RwLock::new(Vec::new()),
        }
    }

    /// 受け取ったクエリ
    pub fn queries(&self) -> Vec<TableQuery> {
        self.queries.read().unwrap().clone()
    }

    fn run(&self, query: &TableQuery) -> Result<Vec<RawProfileRow>> {
        self.queries.write().unwrap().push(query.clone());

        if let Some((status, message)) = &self.failure {
            return Err(StashError::Api {
                host: "mock".to_string(),
                status: *status,
                message: message.clone(),
            });
        }

        let mut rows: Vec<RawProfileRow> = self
            .rows
            .iter()
            .filter(|row| {
                query
                    .filters()
                    .iter()
                    .all(|f| f.matches(column_text(row, f.column()).as_deref()))
            })
            .cloned()
            .collect();

        if let Some(order) = query.order_by() {
            rows.sort_by(|a, b| {
                let ord = compare_column(a, b, &order.column);
                match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        if let Some(limit) = query.row_limit() {
            rows.truncate(limit);
        }

        Ok(rows)
    }
}

impl ProfilesSource for MockProfilesSource {
    fn select_profiles<'a>(
        &'a self,
        query: &'a TableQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawProfileRow>>> + Send + 'a>> {
        let result = self.run(query);
        Box::pin(async move { result })
    }
}

fn column(row: &RawProfileRow, name: &str) -> Value {
    match name {
        "id" => row.id.clone(),
        "handle" => row.handle.clone(),
        "display_name" => row.display_name.clone(),
        "avatar_url" => row.avatar_url.clone(),
        "created_at" => row.created_at.clone(),
        _ => Value::Null,
    }
}

fn column_text(row: &RawProfileRow, name: &str) -> Option<String> {
    match column(row, name) {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn compare_column(a: &RawProfileRow, b: &RawProfileRow, name: &str) -> Ordering {
    column_text(a, name).cmp(&column_text(b, name))
}
