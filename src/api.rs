//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SheetToVcfError;

/// 連絡先の論理フィールド
///
/// スプレッドシートの列を割り当てる対象です。`ContactField::ALL`は
/// 列推定で走査する固定順（name → phone → email → company → notes）です。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    /// 氏名
    Name,
    /// 電話番号
    Phone,
    /// メールアドレス
    Email,
    /// 会社名
    Company,
    /// メモ
    Notes,
}

impl ContactField {
    /// すべてのフィールド（列推定の走査順）
    pub const ALL: [ContactField; 5] = [
        ContactField::Name,
        ContactField::Phone,
        ContactField::Email,
        ContactField::Company,
        ContactField::Notes,
    ];

    /// 表示用ラベル
    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Phone => "Phone",
            ContactField::Email => "Email",
            ContactField::Company => "Company",
            ContactField::Notes => "Notes",
        }
    }

    /// 連絡先を識別するフィールドかどうか
    ///
    /// 名前と電話番号のうち少なくとも一方が割り当てられている必要があります。
    pub fn is_identifying(self) -> bool {
        matches!(self, ContactField::Name | ContactField::Phone)
    }
}

/// 入力ファイルの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputFormat {
    /// 区切り文字形式のテキスト（CSV）
    ///
    /// 引用符で囲まれたフィールド内の区切り文字・改行を正しく扱います。
    Csv,

    /// バイナリのワークブック（xlsx / xlsm / xlsb / xls / ods）
    ///
    /// 最初のシートのみを読み込みます。
    Workbook,
}

impl InputFormat {
    /// 拡張子から入力形式を判定する（大文字小文字は区別しない）
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheet2vcf::InputFormat;
    ///
    /// assert_eq!(InputFormat::from_extension("CSV").unwrap(), InputFormat::Csv);
    /// assert_eq!(InputFormat::from_extension("xlsx").unwrap(), InputFormat::Workbook);
    /// assert!(InputFormat::from_extension("pdf").is_err());
    /// ```
    pub fn from_extension(extension: &str) -> Result<Self, SheetToVcfError> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputFormat::Workbook),
            other => Err(SheetToVcfError::UnsupportedFormat(other.to_string())),
        }
    }

    /// ファイルパスの拡張子から入力形式を判定する
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SheetToVcfError> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }
}
