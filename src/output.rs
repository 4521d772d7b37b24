use crate::profile::CreatorProfile;
use crate::rest::PingReport;
use chrono::DateTime;
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;
use serde_json::Value;

pub struct CommandSummary {
    pub prefix: String,
    pub message: String,
}

impl CommandSummary {
    /// 一覧件数のサマリ
    pub fn listing(shown: usize, limit: usize) -> Self {
        match shown {
            0 => Self {
                prefix: "•".yellow().to_string(),
                message: "No creators found".to_string(),
            },
            n => Self {
                prefix: "✓".green().to_string(),
                message: format!("{} creator(s) (limit {})", n.green(), limit),
            },
        }
    }

    /// 疎通確認のサマリ
    pub fn ping(report: &PingReport) -> Self {
        let auth = if report.authenticated {
            "auth token"
        } else {
            "anon key"
        };
        Self {
            prefix: "✓".green().to_string(),
            message: format!(
                "Backend reachable: HTTP {} in {} ms ({})",
                report.status,
                report.elapsed.as_millis(),
                auth
            ),
        }
    }

    pub fn line(&self) -> String {
        format!("{} {}", self.prefix, self.message)
    }
}

/// クリエイター一覧のテーブル
pub fn creators_table(creators: &[CreatorProfile]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Handle", "Name", "Joined", "ID"]);

    for creator in creators {
        table.add_row(vec![
            display_handle(creator),
            creator.display_name.clone(),
            format_created_at(creator.created_at.as_ref()),
            creator.id.clone(),
        ]);
    }

    table
}

/// ハンドルのみ（なければID）を1行ずつ
pub fn creators_simple(creators: &[CreatorProfile]) -> String {
    creators
        .iter()
        .map(|c| {
            if c.handle.is_empty() {
                c.id.clone()
            } else {
                display_handle(c)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn creators_json(creators: &[CreatorProfile]) -> Result<String, String> {
    serde_json::to_string_pretty(creators)
        .map_err(|e| format!("Failed to serialize creators: {}", e))
}

fn display_handle(creator: &CreatorProfile) -> String {
    if creator.handle.is_empty() {
        "-".to_string()
    } else {
        format!("@{}", creator.handle)
    }
}

/// RFC3339 なら日付のみ、それ以外は元の値をそのまま表示
pub fn format_created_at(created_at: Option<&Value>) -> String {
    match created_at {
        None => "-".to_string(),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| s.clone()),
        Some(other) => other.to_string(),
    }
}
