//! Parser Module
//!
//! 入力（CSVテキストまたはワークブック）を、ヘッダーとデータ行からなる
//! 表に変換するモジュール。どちらの経路も「最初のレコードをヘッダーとし、
//! すべてのセルが空白の行を除外する」という同じ規則に従います。

mod delimited;
mod workbook;

use tracing::debug;

use crate::api::InputFormat;
use crate::error::SheetToVcfError;
use crate::suggest::suggest_mapping;
use crate::types::{SpreadsheetData, Table};

pub use delimited::{parse_csv, parse_csv_bytes, parse_csv_with_delimiter};
pub use workbook::parse_workbook;

/// 入力形式に応じてバイト列を解析する
///
/// # 引数
///
/// * `bytes` - 入力ファイルの内容
/// * `format` - 入力形式
/// * `delimiter` - CSVの区切り文字（ワークブックでは無視）
///
/// # 戻り値
///
/// * `Ok(SpreadsheetData)` - 表と推定マッピング
/// * `Err(SheetToVcfError)` - 空の入力、または解析できない入力の場合
pub fn parse(
    bytes: &[u8],
    format: InputFormat,
    delimiter: u8,
) -> Result<SpreadsheetData, SheetToVcfError> {
    match format {
        InputFormat::Csv => parse_csv_bytes(bytes, delimiter),
        InputFormat::Workbook => parse_workbook(bytes),
    }
}

/// セルがすべて空白の行かどうか
pub(crate) fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// レコード列から表を構築し、列マッピングを推定する
///
/// `source`はエラーメッセージに使う入力の呼び名です（例: "CSV"）。
pub(crate) fn build_spreadsheet(
    records: Vec<Vec<String>>,
    source: &str,
) -> Result<SpreadsheetData, SheetToVcfError> {
    let mut records = records.into_iter();
    let headers = records
        .next()
        .ok_or_else(|| SheetToVcfError::EmptyInput(format!("{} is empty", source)))?;

    let mut dropped = 0usize;
    let rows: Vec<Vec<String>> = records
        .filter(|row| {
            let keep = !is_blank_row(row);
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();

    debug!(
        source,
        columns = headers.len(),
        rows = rows.len(),
        blank_rows_dropped = dropped,
        "parsed table"
    );

    let suggested_mapping = suggest_mapping(&headers);
    Ok(SpreadsheetData {
        table: Table::new(headers, rows),
        suggested_mapping,
    })
}
