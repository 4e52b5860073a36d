//! Remote Sheet Module
//!
//! 公開されたGoogleスプレッドシートをCSVとして取得するモジュール。
//! URLからのシートID抽出は常に利用できます。HTTP取得は`remote`フィーチャーで
//! 有効になり、取得したテキストはCSVの経路で解析されます。再試行は行いません。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RemoteFetchError;

/// エクスポートURLの既定のホスト
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://docs.google.com";

static SHEET_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").expect("sheet id pattern is a valid regex")
});

/// シートのURLからシートIDを抽出する
///
/// ```rust
/// use sheet2vcf::extract_sheet_id;
///
/// let id = extract_sheet_id("https://docs.google.com/spreadsheets/d/1AbC-d_9/edit#gid=0").unwrap();
/// assert_eq!(id, "1AbC-d_9");
/// assert!(extract_sheet_id("https://example.com/sheet").is_err());
/// ```
pub fn extract_sheet_id(url: &str) -> Result<String, RemoteFetchError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(RemoteFetchError::InvalidUrl("URL is required".to_string()));
    }

    SHEET_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| RemoteFetchError::InvalidUrl(url.to_string()))
}

/// シートIDから公開CSVエクスポートのURLを組み立てる
pub fn csv_export_url(sheet_id: &str) -> String {
    export_url_with_base(DEFAULT_SHEETS_BASE_URL, sheet_id)
}

fn export_url_with_base(base_url: &str, sheet_id: &str) -> String {
    format!(
        "{}/spreadsheets/d/{}/export?format=csv",
        base_url.trim_end_matches('/'),
        sheet_id
    )
}

#[cfg(feature = "remote")]
pub use fetcher::SheetFetcher;

#[cfg(feature = "remote")]
mod fetcher {
    use std::time::Duration;

    use reqwest::blocking::Client;
    use reqwest::StatusCode;
    use tracing::{debug, warn};

    use super::{export_url_with_base, extract_sheet_id, DEFAULT_SHEETS_BASE_URL};
    use crate::error::{RemoteFetchError, SheetToVcfError};
    use crate::parser::parse_csv;
    use crate::types::SpreadsheetData;

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// 公開シートのCSV取得クライアント（ブロッキング）
    #[derive(Debug, Clone)]
    pub struct SheetFetcher {
        client: Client,
        base_url: String,
    }

    impl SheetFetcher {
        /// 既定のタイムアウト（30秒）でクライアントを生成
        pub fn new() -> Result<Self, RemoteFetchError> {
            Self::with_timeout(DEFAULT_TIMEOUT)
        }

        /// タイムアウトを指定してクライアントを生成
        pub fn with_timeout(timeout: Duration) -> Result<Self, RemoteFetchError> {
            let client = Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| RemoteFetchError::Http(e.to_string()))?;
            Ok(Self {
                client,
                base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            })
        }

        /// エクスポート先のホストを変更する（ミラーやテスト用）
        pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
            self.base_url = base_url.into();
            self
        }

        /// シートIDに対応するエクスポートURL
        pub fn export_url(&self, sheet_id: &str) -> String {
            export_url_with_base(&self.base_url, sheet_id)
        }

        /// シートのURLからCSVテキストを取得する
        ///
        /// # 戻り値
        ///
        /// * `Ok(String)` - CSVテキスト
        /// * `Err(RemoteFetchError::InvalidUrl)` - シートIDを抽出できない
        /// * `Err(RemoteFetchError::NotFound)` - 404
        /// * `Err(RemoteFetchError::AccessDenied)` - その他の失敗ステータス
        /// * `Err(RemoteFetchError::EmptyResult)` - 本文が空
        /// * `Err(RemoteFetchError::Http)` - 通信エラー
        pub fn fetch_csv(&self, url: &str) -> Result<String, RemoteFetchError> {
            let sheet_id = extract_sheet_id(url)?;
            let export_url = self.export_url(&sheet_id);
            debug!(%sheet_id, "fetching sheet export");

            let response = self
                .client
                .get(&export_url)
                .send()
                .map_err(|e| RemoteFetchError::Http(e.to_string()))?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(RemoteFetchError::NotFound);
            }
            if !status.is_success() {
                warn!(status = status.as_u16(), "sheet export refused");
                return Err(RemoteFetchError::AccessDenied(status.as_u16()));
            }

            let body = response
                .text()
                .map_err(|e| RemoteFetchError::Http(e.to_string()))?;
            if body.trim().is_empty() {
                return Err(RemoteFetchError::EmptyResult);
            }
            Ok(body)
        }

        /// シートを取得し、CSVとして解析する
        pub fn fetch(&self, url: &str) -> Result<SpreadsheetData, SheetToVcfError> {
            let body = self.fetch_csv(url)?;
            parse_csv(&body)
        }
    }
}
