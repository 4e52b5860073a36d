//! sheet2vcf - Pure-Rust spreadsheet-to-vCard converter
//!
//! CSVやExcelなどの表形式の連絡先データを、スマートフォンの連絡先アプリで
//! そのまま読み込めるvCard（.vcf）形式に変換するクレートです。
//!
//! 処理は3段階です。
//!
//! 1. 取り込み: 入力を表（ヘッダー + データ行）に変換し、列マッピングを推定する
//! 2. 列マッピング: 各行を連絡先に変換する（名前も電話番号もない行は除外）
//! 3. vCard生成: 連絡先をvCard 3.0の文書に変換する
//!
//! # Quick Start
//!
//! ```rust
//! use sheet2vcf::{ConverterBuilder, InputFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let csv = "Full Name,Mobile,Email Address\nJane Q. Public,555-1234,jane@x.com\n";
//!     let mut output = Vec::new();
//!     converter.convert(csv.as_bytes(), InputFormat::Csv, &mut output)?;
//!
//!     let vcf = String::from_utf8(output)?;
//!     assert!(vcf.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
//!     Ok(())
//! }
//! ```
//!
//! # Editing the Mapping
//!
//! 推定されたマッピングは呼び出し側で変更できます。
//!
//! ```rust
//! use sheet2vcf::{apply_label_prefix, map_rows, parse_csv, ContactField, VcfDocument};
//!
//! # fn main() -> Result<(), sheet2vcf::SheetToVcfError> {
//! let data = parse_csv("Who,Number,Remarks\nAnn Lee,+1 555 0100,met at expo\n")?;
//!
//! let mut mapping = data.suggested_mapping;
//! mapping.set(ContactField::Name, Some(0));
//! mapping.set(ContactField::Phone, Some(1));
//! mapping.validate()?;
//!
//! let contacts = map_rows(&data.table.rows, &mapping);
//! let document = VcfDocument::from_contacts(&apply_label_prefix(&contacts, "Expo"));
//! assert!(document.text().contains("FN:Expo - Ann Lee\r\n"));
//! assert!(document.text().contains("NOTE:met at expo\r\n"));
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod mapper;
mod output;
mod parser;
mod remote;
mod suggest;
mod types;

// 公開API
pub use api::{ContactField, InputFormat};
pub use builder::{Converter, ConverterBuilder};
pub use error::{RemoteFetchError, SheetToVcfError};
pub use mapper::{apply_label_prefix, map_row, map_rows};
pub use output::{
    clean_phone, escape_text, render_card, render_document, VcfDocument, CARD_SEPARATOR,
    DEFAULT_FILE_NAME, LINE_TERMINATOR, QR_CODE_MAX_CONTACTS, VCARD_MEDIA_TYPE, VCARD_VERSION,
};
pub use parser::{parse, parse_csv, parse_csv_bytes, parse_csv_with_delimiter, parse_workbook};
#[cfg(feature = "remote")]
pub use remote::SheetFetcher;
pub use remote::{csv_export_url, extract_sheet_id, DEFAULT_SHEETS_BASE_URL};
pub use suggest::{find_column, header_matches, suggest_mapping};
pub use types::{ContactRecord, FieldMapping, SpreadsheetData, Table};
