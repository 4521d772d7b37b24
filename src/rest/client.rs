use crate::config::{Endpoint, HttpConfig};
use crate::directory::ProfilesSource;
use crate::error::Result;
use crate::http;
use crate::profile::RawProfileRow;
use crate::rest::TableQuery;
use crate::settings::AuthToken;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};
use tracing::debug;

/// エラー表示用のホスト名
pub const HOST_LABEL: &str = "postgrest";

/// 疎通確認で読むテーブル
pub const PING_TABLE: &str = "stashes";

/// 疎通確認の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingReport {
    pub status: u16,
    pub elapsed: Duration,
    /// 認証トークンを使ったか（false なら anon キー）
    pub authenticated: bool,
}

/// PostgREST クライアント
pub struct RestClient {
    http: Client,
    endpoint: Endpoint,
    token: Option<AuthToken>,
}

impl RestClient {
    pub fn new(endpoint: Endpoint, config: &HttpConfig) -> Self {
        Self {
            http: config.build_client(),
            endpoint,
            token: None,
        }
    }

    /// ユーザーの認証トークンを設定（None なら anon キーで認証）
    pub fn with_token(mut self, token: Option<AuthToken>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, query: &TableQuery) -> String {
        format!("{}/{}", self.endpoint.api_url, query.path())
    }

    fn bearer(&self) -> String {
        match &self.token {
            Some(token) => token.to_bearer(),
            None => format!("Bearer {}", self.endpoint.anon_key),
        }
    }

    fn request(&self, query: &TableQuery) -> RequestBuilder {
        self.http
            .get(self.url(query))
            .query(&query.to_query_pairs())
            .header("apikey", &self.endpoint.anon_key)
            .header("Authorization", self.bearer())
            .header("Accept", "application/json")
    }

    /// テーブルを読み、行をデコードして返す
    pub async fn select<T: DeserializeOwned>(&self, query: &TableQuery) -> Result<Vec<T>> {
        debug!(table = query.table(), limit = ?query.row_limit(), "select");

        let response = self.request(query).send().await?;
        let response = http::ensure_success(response, HOST_LABEL).await?;
        http::read_json(response).await
    }

    /// `stashes` テーブルを1行だけ読み、認証と疎通を確認する
    pub async fn ping(&self) -> Result<PingReport> {
        let query = TableQuery::from(PING_TABLE).select(&["id"]).limit(1);
        let started = Instant::now();

        let response = self.request(&query).send().await?;
        let status = response.status().as_u16();
        http::ensure_success(response, HOST_LABEL).await?;

        Ok(PingReport {
            status,
            elapsed: started.elapsed(),
            authenticated: self.token.is_some(),
        })
    }
}

impl ProfilesSource for RestClient {
    fn select_profiles<'a>(
        &'a self,
        query: &'a TableQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawProfileRow>>> + Send + 'a>> {
        Box::pin(async move {
            let rows: Vec<Value> = self.select(query).await?;
            let malformed = rows.iter().filter(|row| !row.is_object()).count();
            if malformed > 0 {
                debug!(malformed, "non-object rows in profiles response");
            }

            Ok(rows.into_iter().map(RawProfileRow::from_value).collect())
        })
    }
}
