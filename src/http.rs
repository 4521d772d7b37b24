//! 共通HTTPヘルパー

use crate::error::{Result, StashError};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// PostgREST のエラーボディ
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    hint: Option<String>,
}

/// 非2xxレスポンスを `StashError::Api` に変換する
pub async fn ensure_success(response: Response, host: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    Err(StashError::Api {
        host: host.to_string(),
        status,
        message: error_message(&body),
    })
}

/// ボディ全体を読み、JSON としてデコードする
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| StashError::MalformedResponse(e.to_string()))
}

/// エラーボディからメッセージを取り出す（JSONでなければそのまま）
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            hint: Some(hint),
        }) => format!("{} ({})", message, hint),
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
