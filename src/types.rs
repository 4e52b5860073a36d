//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::{Deserialize, Serialize};

use crate::api::ContactField;
use crate::error::SheetToVcfError;

/// ヘッダー行とデータ行からなる表
///
/// 行の長さはヘッダーと一致するとは限らないため、セルへのアクセスは
/// `cell()`で範囲外を`None`として扱ってください。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// ヘッダー（最初のレコード）
    pub headers: Vec<String>,

    /// データ行（空行は取り込み時に除外済み）
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// 新しい表を生成
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// 指定セルの値（範囲外は`None`）
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }

    /// データ行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数（ヘッダーと最長の行のうち大きい方）
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len())
    }

    /// 先頭`n`行（プレビュー表示用）
    pub fn preview(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// 論理フィールドから列インデックスへの割り当て
///
/// 列名ではなくインデックスで結び付けるため、ヘッダー名の重複や変更の
/// 影響を受けません。同じ列を複数のフィールドに割り当てることもできます。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldMapping {
    pub name: Option<usize>,
    pub phone: Option<usize>,
    pub email: Option<usize>,
    pub company: Option<usize>,
    pub notes: Option<usize>,
}

impl FieldMapping {
    /// すべて未割り当てのマッピングを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドに割り当てられた列インデックス
    pub fn get(&self, field: ContactField) -> Option<usize> {
        match field {
            ContactField::Name => self.name,
            ContactField::Phone => self.phone,
            ContactField::Email => self.email,
            ContactField::Company => self.company,
            ContactField::Notes => self.notes,
        }
    }

    /// フィールドの割り当てを変更する（`None`で解除）
    pub fn set(&mut self, field: ContactField, index: Option<usize>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Phone => &mut self.phone,
            ContactField::Email => &mut self.email,
            ContactField::Company => &mut self.company,
            ContactField::Notes => &mut self.notes,
        };
        *slot = index;
    }

    /// フィールドに列を割り当てたコピーを返す（メソッドチェーン用）
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheet2vcf::{ContactField, FieldMapping};
    ///
    /// let mapping = FieldMapping::new()
    ///     .with(ContactField::Name, 0)
    ///     .with(ContactField::Phone, 2);
    /// assert_eq!(mapping.phone, Some(2));
    /// ```
    pub fn with(mut self, field: ContactField, index: usize) -> Self {
        self.set(field, Some(index));
        self
    }

    /// すべてのフィールドが未割り当てかどうか
    pub fn is_unmapped(&self) -> bool {
        ContactField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// 名前列・電話列の少なくとも一方が割り当てられているかを検証する
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 変換に進める場合
    /// * `Err(SheetToVcfError::MappingValidation)` - どちらも未割り当ての場合
    pub fn validate(&self) -> Result<(), SheetToVcfError> {
        if ContactField::ALL
            .iter()
            .filter(|f| f.is_identifying())
            .any(|f| self.get(*f).is_some())
        {
            Ok(())
        } else {
            Err(SheetToVcfError::MappingValidation(
                "Select at least a Name or Phone column".to_string(),
            ))
        }
    }
}

/// 1行から構築された連絡先
///
/// 構築後は変更しません。ラベル付与は`with_label_prefix()`でコピーを作ります。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// 名（氏名の最初のトークン）
    pub first_name: String,

    /// 姓（残りのトークンを半角スペースで連結）
    pub last_name: String,

    /// 表示名（氏名が空の場合は電話番号）
    pub full_name: String,

    /// 電話番号（未正規化）
    pub phone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ContactRecord {
    /// 表示名の先頭にラベルを付けたコピーを返す
    ///
    /// ラベルはtrimされ、空の場合は元の表示名のままです。
    ///
    /// ```rust
    /// use sheet2vcf::ContactRecord;
    ///
    /// let contact = ContactRecord {
    ///     full_name: "Jane Doe".to_string(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(contact.with_label_prefix(" Expo ").full_name, "Expo - Jane Doe");
    /// assert_eq!(contact.with_label_prefix("  ").full_name, "Jane Doe");
    /// ```
    pub fn with_label_prefix(&self, prefix: &str) -> ContactRecord {
        let prefix = prefix.trim();
        let mut labeled = self.clone();
        if !prefix.is_empty() {
            labeled.full_name = format!("{} - {}", prefix, self.full_name);
        }
        labeled
    }
}

/// 取り込み結果（表と推定マッピング）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetData {
    pub table: Table,
    pub suggested_mapping: FieldMapping,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(
            vec!["Name".to_string(), "Phone".to_string()],
            vec![
                vec!["Ann".to_string()],
                vec!["Bob".to_string(), "555".to_string(), "extra".to_string()],
            ],
        )
    }

    #[test]
    fn test_table_cell_out_of_range() {
        let table = sample_table();
        assert_eq!(table.cell(0, 0), Some("Ann"));
        assert_eq!(table.cell(0, 1), None);
        assert_eq!(table.cell(1, 2), Some("extra"));
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn test_table_counts_and_preview() {
        let table = sample_table();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.preview(1).len(), 1);
        assert_eq!(table.preview(10).len(), 2);
    }

    #[test]
    fn test_mapping_get_set() {
        let mut mapping = FieldMapping::new();
        assert!(mapping.is_unmapped());

        mapping.set(ContactField::Email, Some(3));
        assert_eq!(mapping.get(ContactField::Email), Some(3));
        assert!(!mapping.is_unmapped());

        mapping.set(ContactField::Email, None);
        assert!(mapping.is_unmapped());
    }

    #[test]
    fn test_mapping_same_column_for_two_fields() {
        let mapping = FieldMapping::new()
            .with(ContactField::Name, 1)
            .with(ContactField::Notes, 1);
        assert_eq!(mapping.name, Some(1));
        assert_eq!(mapping.notes, Some(1));
    }

    #[test]
    fn test_mapping_validate() {
        assert!(FieldMapping::new().with(ContactField::Name, 0).validate().is_ok());
        assert!(FieldMapping::new().with(ContactField::Phone, 0).validate().is_ok());

        let result = FieldMapping::new()
            .with(ContactField::Email, 0)
            .with(ContactField::Company, 1)
            .validate();
        match result {
            Err(SheetToVcfError::MappingValidation(msg)) => {
                assert!(msg.contains("Name or Phone"));
            }
            _ => panic!("Expected MappingValidation error"),
        }
    }

    #[test]
    fn test_mapping_json_shape() {
        let mapping = FieldMapping::new().with(ContactField::Phone, 1);
        let json = serde_json::to_value(mapping).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": null,
                "phone": 1,
                "email": null,
                "company": null,
                "notes": null
            })
        );
    }

    #[test]
    fn test_label_prefix_does_not_mutate() {
        let contact = ContactRecord {
            first_name: "Jane".to_string(),
            full_name: "Jane".to_string(),
            ..Default::default()
        };
        let labeled = contact.with_label_prefix("VIP");
        assert_eq!(labeled.full_name, "VIP - Jane");
        assert_eq!(labeled.first_name, "Jane");
        assert_eq!(contact.full_name, "Jane");
    }
}
