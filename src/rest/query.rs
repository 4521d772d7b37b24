//! PostgREST クエリビルダー
//!
//! テーブル読み取りに必要な最小限の機能（列選択・除外フィルタ・並び順・件数制限）のみ扱う。

/// 並び順の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// 並び順
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// 行フィルタ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Neq { column: String, value: String },
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Neq { column, .. } => column,
        }
    }

    /// `id=neq.abc` の右辺
    fn operand(&self) -> String {
        match self {
            Filter::Neq { value, .. } => format!("neq.{}", quote_value(value)),
        }
    }

    /// 値がフィルタを通過するか（SQL と同様に NULL は通過しない）
    pub fn matches(&self, actual: Option<&str>) -> bool {
        match self {
            Filter::Neq { value, .. } => actual.is_some_and(|actual| actual != value),
        }
    }
}

/// テーブル読み取りクエリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    table: String,
    columns: Vec<String>,
    filters: Vec<Filter>,
    order: Option<Order>,
    limit: Option<usize>,
}

impl TableQuery {
    /// 対象テーブルを指定して作成
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn neq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Neq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn order_by(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn row_limit(&self) -> Option<usize> {
        self.limit
    }

    /// `/rest/v1/{table}` 以降の相対パス
    pub fn path(&self) -> String {
        format!("rest/v1/{}", self.table)
    }

    /// URLクエリパラメータに変換
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        let select = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(",")
        };
        pairs.push(("select".to_string(), select));

        for filter in &self.filters {
            pairs.push((filter.column().to_string(), filter.operand()));
        }

        if let Some(order) = &self.order {
            pairs.push((
                "order".to_string(),
                format!("{}.{}", order.column, order.direction.as_str()),
            ));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        pairs
    }
}

/// PostgREST の予約文字を含む値をダブルクォートで囲む
fn quote_value(value: &str) -> String {
    const RESERVED: &[char] = &[',', '.', ':', '(', ')', '"', '\\', ' '];

    if !value.contains(RESERVED) {
        return value.to_string();
    }

    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}
