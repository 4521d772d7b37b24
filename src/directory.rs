//! クリエイターディレクトリ
//!
//! `profiles` テーブルから新しい順にクリエイターを取得し、
//! 正規化・重複除去・検索フィルタ・件数制限を行う。
//!
//! 取得件数は `max(12, limit * 3)` 件まで多めに読む。重複除去と検索で
//! 件数が減るための補填で、`limit` 件返ることは保証しない。

#[cfg(test)]
pub mod mock;

use crate::error::{Result, StashError};
use crate::profile::{CreatorProfile, RawProfileRow, PROFILE_COLUMNS};
use crate::rest::{Direction, TableQuery};
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const PROFILES_TABLE: &str = "profiles";

pub const DEFAULT_LIMIT: usize = 6;
pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 30;

const OVERFETCH_FACTOR: usize = 3;
const OVERFETCH_FLOOR: usize = 12;

/// `profiles` テーブルを読めるデータソース
pub trait ProfilesSource: Send + Sync {
    /// クエリを1回実行し、生の行を返す
    fn select_profiles<'a>(
        &'a self,
        query: &'a TableQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawProfileRow>>> + Send + 'a>>;
}

impl<T: ProfilesSource + ?Sized> ProfilesSource for Arc<T> {
    fn select_profiles<'a>(
        &'a self,
        query: &'a TableQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawProfileRow>>> + Send + 'a>> {
        (**self).select_profiles(query)
    }
}

impl<T: ProfilesSource + ?Sized> ProfilesSource for Box<T> {
    fn select_profiles<'a>(
        &'a self,
        query: &'a TableQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawProfileRow>>> + Send + 'a>> {
        (**self).select_profiles(query)
    }
}

/// 取得条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatorQuery {
    /// 最大件数（未指定・非数・0 はデフォルト）
    pub limit: Option<f64>,
    /// 除外するユーザーID
    pub exclude_user_id: Option<String>,
    /// 表示名・ハンドルの部分一致検索
    pub search: Option<String>,
}

impl CreatorQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: f64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn excluding(mut self, user_id: impl Into<String>) -> Self {
        self.exclude_user_id = Some(user_id.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// 有効な件数上限
    pub fn safe_limit(&self) -> usize {
        safe_limit(self.limit)
    }

    /// 前後の空白を除いた除外ID（空なら None）
    pub fn exclusion(&self) -> Option<&str> {
        self.exclude_user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// 正規化済みの検索語（空なら None）
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }
}

/// 件数上限を [1, 30] に丸める
///
/// 未指定・NaN・0 はデフォルトの 6 として扱う。小数は切り捨て。
pub fn safe_limit(limit: Option<f64>) -> usize {
    let requested = match limit {
        Some(n) if !n.is_nan() && n != 0.0 => n,
        _ => DEFAULT_LIMIT as f64,
    };

    requested
        .clamp(MIN_LIMIT as f64, MAX_LIMIT as f64)
        .floor() as usize
}

/// ソースから読む行数
pub fn fetch_size(safe_limit: usize) -> usize {
    (safe_limit * OVERFETCH_FACTOR).max(OVERFETCH_FLOOR)
}

/// `profiles` テーブルへのクエリを組み立てる
pub fn profiles_query(safe_limit: usize, exclusion: Option<&str>) -> TableQuery {
    let mut query = TableQuery::from(PROFILES_TABLE)
        .select(&PROFILE_COLUMNS)
        .order("created_at", Direction::Desc)
        .limit(fetch_size(safe_limit));

    if let Some(user_id) = exclusion {
        query = query.neq("id", user_id);
    }

    query
}

/// 取得結果
///
/// 失敗時も例外にはせず、空の一覧とエラーを返す。
#[derive(Debug)]
pub struct CreatorListing {
    pub creators: Vec<CreatorProfile>,
    pub error: Option<StashError>,
}

impl CreatorListing {
    fn found(creators: Vec<CreatorProfile>) -> Self {
        Self {
            creators,
            error: None,
        }
    }

    fn failed(error: StashError) -> Self {
        Self {
            creators: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// `Result` に変換する
    pub fn into_result(self) -> Result<Vec<CreatorProfile>> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.creators),
        }
    }
}

/// クリエイター一覧の取得
pub struct CreatorDirectory<S> {
    source: S,
}

impl<S: ProfilesSource> CreatorDirectory<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// クリエイター一覧を取得する
    ///
    /// ソースへの問い合わせは1回のみ。リトライ・キャッシュは行わない。
    pub async fn fetch(&self, query: &CreatorQuery) -> CreatorListing {
        let safe_limit = query.safe_limit();
        let table_query = profiles_query(safe_limit, query.exclusion());

        debug!(
            limit = safe_limit,
            fetch_size = fetch_size(safe_limit),
            exclude = query.exclusion().is_some(),
            "querying profiles"
        );

        let rows = match self.source.select_profiles(&table_query).await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, "profiles query failed");
                return CreatorListing::failed(error);
            }
        };

        let fetched = rows.len();
        let creators = select_creators(&rows, query.search_term().as_deref(), safe_limit);
        info!(fetched, returned = creators.len(), "creators listed");

        CreatorListing::found(creators)
    }
}

/// 行を正規化し、重複除去・検索・件数制限をかける
pub fn select_creators(
    rows: &[RawProfileRow],
    search_term: Option<&str>,
    limit: usize,
) -> Vec<CreatorProfile> {
    let unique = dedup_by_id(rows.iter().map(CreatorProfile::from_row));

    filter_creators(unique, search_term)
        .into_iter()
        .take(limit)
        .collect()
}

/// IDで重複除去する（先に現れたものを残す）。IDが空のものは捨てる。
fn dedup_by_id(profiles: impl Iterator<Item = CreatorProfile>) -> Vec<CreatorProfile> {
    let mut seen = HashSet::new();
    profiles
        .filter(|p| p.has_id())
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}

/// 検索語でクリエイターを絞り込む
///
/// - `search_term` が None なら全件返却
/// - 小文字化済みの検索語で "表示名 ハンドル" を部分一致検索
pub fn filter_creators(
    creators: Vec<CreatorProfile>,
    search_term: Option<&str>,
) -> Vec<CreatorProfile> {
    let Some(term) = search_term else {
        return creators;
    };

    creators
        .into_iter()
        .filter(|c| c.search_text().contains(term))
        .collect()
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;

#[cfg(test)]
#[path = "directory_proptests.rs"]
mod proptests;
