/// PostgREST プロジェクトのベースURL
pub const API_URL: &str = "STASH_API_URL";
/// 匿名 (anon) API キー
pub const ANON_KEY: &str = "STASH_ANON_KEY";
/// 保存済みトークンより優先される認証トークン
pub const AUTH_TOKEN: &str = "STASH_AUTH_TOKEN";
/// 設定ディレクトリ（未設定なら ~/.stash）
pub const HOME: &str = "STASH_HOME";

/// 環境変数ユーティリティ
pub struct EnvVar;

impl EnvVar {
    /// 環境変数を取得（前後の空白を除去し、空文字列はNoneとして扱う）
    pub fn get(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
