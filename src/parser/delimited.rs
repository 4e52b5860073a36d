//! Delimited Text Parser
//!
//! `csv`クレートでCSVテキストをレコード列に分割します。
//! 引用符で囲まれたフィールド内の区切り文字・改行・二重引用符を扱い、
//! 行ごとのフィールド数の違いは許容します。

use csv::ReaderBuilder;

use crate::error::SheetToVcfError;
use crate::parser::build_spreadsheet;
use crate::types::SpreadsheetData;

const UTF8_BOM: &str = "\u{feff}";

/// カンマ区切りのCSVテキストを解析する
///
/// # 使用例
///
/// ```rust
/// use sheet2vcf::parse_csv;
///
/// # fn main() -> Result<(), sheet2vcf::SheetToVcfError> {
/// let data = parse_csv("Name,Phone\n\"Doe, Jane\",555-1234\n")?;
/// assert_eq!(data.table.rows[0][0], "Doe, Jane");
/// assert_eq!(data.suggested_mapping.phone, Some(1));
/// # Ok(())
/// # }
/// ```
pub fn parse_csv(text: &str) -> Result<SpreadsheetData, SheetToVcfError> {
    parse_csv_with_delimiter(text, b',')
}

/// 区切り文字を指定してCSVテキストを解析する
pub fn parse_csv_with_delimiter(
    text: &str,
    delimiter: u8,
) -> Result<SpreadsheetData, SheetToVcfError> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect());
    }

    build_spreadsheet(records, "CSV")
}

/// UTF-8のバイト列としてCSVを解析する
///
/// 先頭のBOMは取り除きます。UTF-8として不正なバイト列は
/// `SheetToVcfError::Utf8`になります。
pub fn parse_csv_bytes(bytes: &[u8], delimiter: u8) -> Result<SpreadsheetData, SheetToVcfError> {
    let text = std::str::from_utf8(bytes)?;
    parse_csv_with_delimiter(text, delimiter)
}
