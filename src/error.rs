//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// sheet2vcfクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、列マッピングの検証、リモート取得、
/// 設定の検証中に発生するエラーを統一的に扱います。
///
/// # エラーの種類
///
/// - 解析系（`is_parse_error()`が`true`）: `Io`, `Workbook`, `Csv`, `Utf8`,
///   `EmptyInput`, `UnsupportedFormat`
/// - `Output`: vCard文書の書き出しに失敗した
/// - `MappingValidation`: 名前列・電話列のどちらも選択されていない
/// - `RemoteFetch`: 公開シートの取得に失敗した
/// - `Config`: ビルダー設定の検証に失敗した
///
/// 行単位のデータ不備はエラーになりません。空セルは「値なし」、
/// 不正な電話番号は「TEL行の省略」として扱われます。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheet2vcf::SheetToVcfError;
/// use std::fs::File;
///
/// fn open_sheet(path: &str) -> Result<(), SheetToVcfError> {
///     let _file = File::open(path)?; // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum SheetToVcfError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// vCard文書の書き出し中に発生したI/Oエラー
    ///
    /// 出力先（ファイル、標準出力、パイプなど）の問題であり、
    /// 入力ファイルの不備ではないため解析系エラーには含まれません。
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// calamineクレートがファイルを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// CSVの解析中に発生したエラー
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// UTF-8文字列の変換エラー
    ///
    /// CSVのバイト列がUTF-8として解釈できない場合に発生します。
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// 入力からレコードが1件も得られなかったエラー
    ///
    /// # 例
    ///
    /// ```rust
    /// use sheet2vcf::SheetToVcfError;
    ///
    /// let error = SheetToVcfError::EmptyInput("CSV is empty".to_string());
    /// assert_eq!(error.to_string(), "Empty input: CSV is empty");
    /// ```
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// サポートされていないファイル形式
    ///
    /// 拡張子から入力形式を判定できなかった場合に発生します。
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// 列マッピングの検証に失敗したエラー
    ///
    /// 名前列と電話列のどちらも選択されていない場合に発生します。
    /// パイプライン内部の例外ではなく、呼び出し側（UI/CLI）のゲートです。
    #[error("Mapping validation error: {0}")]
    MappingValidation(String),

    /// 公開シートの取得エラー
    #[error("Remote fetch error: {0}")]
    RemoteFetch(#[from] RemoteFetchError),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust
    /// use sheet2vcf::{ConverterBuilder, SheetToVcfError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_delimiter(b'"') // 引用符は区切り文字に使えない
    ///     .build();
    ///
    /// assert!(matches!(result, Err(SheetToVcfError::Config(_))));
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SheetToVcfError {
    /// 入力ファイルの解析系エラーかどうかを判定
    ///
    /// 解析系エラーは、ユーザーが入力ファイル（またはアクセス権）を
    /// 修正する必要があることを示します。
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            SheetToVcfError::Io(_)
                | SheetToVcfError::Workbook(_)
                | SheetToVcfError::Csv(_)
                | SheetToVcfError::Utf8(_)
                | SheetToVcfError::EmptyInput(_)
                | SheetToVcfError::UnsupportedFormat(_)
        )
    }
}

/// 公開シート取得時のエラー
///
/// 呼び出し側に返すHTTPステータス相当の値を`status_code()`で取得できます。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteFetchError {
    /// URLが空、またはシートIDを抽出できない（400相当）
    #[error("Invalid Google Sheets URL: {0}")]
    InvalidUrl(String),

    /// シートが見つからない（404相当）
    #[error("Sheet not found. Make sure it's publicly accessible.")]
    NotFound,

    /// 非公開、またはエクスポートが拒否された
    #[error("Failed to fetch sheet (status {0}). Ensure it's shared publicly (Anyone with the link).")]
    AccessDenied(u16),

    /// 取得結果が空（400相当）
    #[error("Sheet appears to be empty")]
    EmptyResult,

    /// 通信エラー
    #[error("Failed to fetch Google Sheet: {0}")]
    Http(String),
}

impl RemoteFetchError {
    /// HTTPステータス相当の値
    pub fn status_code(&self) -> u16 {
        match self {
            RemoteFetchError::InvalidUrl(_) | RemoteFetchError::EmptyResult => 400,
            RemoteFetchError::NotFound => 404,
            RemoteFetchError::AccessDenied(status) => *status,
            RemoteFetchError::Http(_) => 500,
        }
    }
}
