//! Workbook Parser
//!
//! calamineを使用してワークブックの最初のシートを文字列のグリッドに変換します。
//! 2枚目以降のシートは読み込みません。

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::NaiveTime;
use tracing::{debug, warn};

use crate::error::SheetToVcfError;
use crate::parser::build_spreadsheet;
use crate::types::SpreadsheetData;

/// ワークブックのバイト列を解析する
///
/// 形式（xlsx / xlsm / xlsb / xls / ods）はcalamineが自動判定します。
///
/// # 戻り値
///
/// * `Ok(SpreadsheetData)` - 最初のシートの表と推定マッピング
/// * `Err(SheetToVcfError::Workbook)` - ワークブックとして解析できない場合
/// * `Err(SheetToVcfError::EmptyInput)` - シートがない、または最初のシートが空の場合
pub fn parse_workbook(bytes: &[u8]) -> Result<SpreadsheetData, SheetToVcfError> {
    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_count = sheets.sheet_names().len();
    if sheet_count > 1 {
        debug!(sheet_count, "reading first sheet only");
    }

    let range = match sheets.worksheet_range_at(0) {
        Some(range) => range?,
        None => {
            warn!("workbook contains no sheets");
            return Err(SheetToVcfError::EmptyInput(
                "Workbook contains no sheets".to_string(),
            ));
        }
    };

    build_spreadsheet(range_to_records(&range), "Spreadsheet")
}

/// シートの使用範囲を行優先の文字列グリッドに変換
///
/// calamineの範囲は最初の非空セルから始まるため、先頭の空列を補って
/// 列インデックスをシートの列記号（A=0, B=1, ...）と一致させます。
fn range_to_records(range: &Range<Data>) -> Vec<Vec<String>> {
    let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    range
        .rows()
        .map(|row| {
            let mut record = vec![String::new(); col_offset];
            record.extend(row.iter().map(cell_to_string));
            record
        })
        .collect()
}

/// セルの値を文字列に変換
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if dt.is_datetime() => {
                if datetime.time() == NaiveTime::MIN {
                    datetime.format("%Y-%m-%d").to_string()
                } else {
                    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
                }
            }
            _ => format_number(dt.as_f64()),
        },
        other => other.to_string(),
    }
}

/// 数値を文字列に変換（整数値は小数点なし）
///
/// 電話番号が数値セルとして保存されている場合でも`15550000000`のように
/// 桁がそのまま残ります。
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(15550000000.0), "15550000000");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.25), "1.25");
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("Ann".to_string())), "Ann");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::Float(5551234.0)), "5551234");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
        assert_eq!(cell_to_string(&Data::Error(CellErrorType::NA)), "#N/A");
    }

    #[test]
    fn test_range_offset_preserves_column_letters() {
        let mut range: Range<Data> = Range::new((0, 1), (1, 2));
        range.set_value((0, 1), Data::String("Name".to_string()));
        range.set_value((0, 2), Data::String("Phone".to_string()));
        range.set_value((1, 1), Data::String("Ann".to_string()));
        range.set_value((1, 2), Data::Float(555.0));

        let records = range_to_records(&range);
        assert_eq!(records[0], vec!["", "Name", "Phone"]);
        assert_eq!(records[1], vec!["", "Ann", "555"]);
    }

    #[test]
    fn test_invalid_bytes() {
        let result = parse_workbook(b"not a workbook");
        assert!(matches!(result, Err(SheetToVcfError::Workbook(_))));

        let result = parse_workbook(&[]);
        assert!(result.is_err());
    }
}
