//! クリエイタープロフィール
//!
//! `profiles` テーブルの生の行を正規化済みの [`CreatorProfile`] に変換する。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 表示名が得られないときのプレースホルダー
pub const PLACEHOLDER_NAME: &str = "Stash user";

/// `profiles` テーブルから取得する列
pub const PROFILE_COLUMNS: [&str; 5] = ["id", "handle", "display_name", "avatar_url", "created_at"];

/// `profiles` テーブルの生の行
///
/// どのフィールドも欠落・任意の JSON 型を許容する。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawProfileRow {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub handle: Value,
    #[serde(default)]
    pub display_name: Value,
    #[serde(default)]
    pub avatar_url: Value,
    #[serde(default)]
    pub created_at: Value,
}

impl RawProfileRow {
    /// 任意の JSON 値から行を作る
    ///
    /// オブジェクトでない値（null・文字列・数値・配列）は全フィールド欠落の行になる。
    pub fn from_value(value: Value) -> Self {
        // 配列は構造体へ位置で割り当てられてしまう
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// 正規化済みのクリエイタープロフィール
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorProfile {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub avatar_url: String,
    /// ソースの値をそのまま保持する（null は None）
    pub created_at: Option<Value>,
}

impl CreatorProfile {
    /// 行をプロフィールに変換する
    ///
    /// 変換自体は失敗しない。`id` が空のプロフィールは呼び出し側で破棄する。
    pub fn from_row(row: &RawProfileRow) -> Self {
        let handle = normalize_handle(text_field(&row.handle).unwrap_or_default());

        let display_name = match text_field(&row.display_name).map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ if !handle.is_empty() => handle.clone(),
            _ => PLACEHOLDER_NAME.to_string(),
        };

        let created_at = match &row.created_at {
            Value::Null => None,
            other => Some(other.clone()),
        };

        Self {
            id: id_field(&row.id),
            handle,
            display_name,
            avatar_url: text_field(&row.avatar_url)
                .map(|url| url.trim().to_string())
                .unwrap_or_default(),
            created_at,
        }
    }

    /// 有効なID（空でない）を持つか
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// 検索対象テキスト（小文字化した "表示名 ハンドル"）
    pub fn search_text(&self) -> String {
        format!("{} {}", self.display_name, self.handle).to_lowercase()
    }
}

/// ハンドルを正規化する: 前後の空白と先頭の `@` を除去し小文字化
pub fn normalize_handle(raw: &str) -> String {
    raw.trim_start_matches(|c: char| c == '@' || c.is_whitespace())
        .trim_end()
        .to_lowercase()
}

fn text_field(value: &Value) -> Option<&str> {
    value.as_str()
}

fn id_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
