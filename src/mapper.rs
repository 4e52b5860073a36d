//! Row Mapper Module
//!
//! 列マッピングを各行に適用し、連絡先を構築するモジュール。
//! すべて純粋関数で、不正なインデックスは空セルとして扱いエラーにしません。

use tracing::debug;

use crate::types::{ContactRecord, FieldMapping};

/// 割り当てられた列の値をtrimして取得（未割り当て・範囲外は空文字列）
fn read_cell(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| row.get(i))
        .map(|cell| cell.trim())
        .unwrap_or("")
}

/// 任意フィールドの値（未割り当て、または空の場合は`None`）
fn read_optional(row: &[String], index: Option<usize>) -> Option<String> {
    let value = read_cell(row, index);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// 1行を連絡先に変換する
///
/// 名前と電話番号がどちらも空の行は`None`になります。
///
/// # 使用例
///
/// ```rust
/// use sheet2vcf::{map_row, ContactField, FieldMapping};
///
/// let mapping = FieldMapping::new()
///     .with(ContactField::Name, 0)
///     .with(ContactField::Phone, 1);
/// let row = vec!["Jane Q. Public".to_string(), "555-1234".to_string()];
///
/// let contact = map_row(&row, &mapping).unwrap();
/// assert_eq!(contact.first_name, "Jane");
/// assert_eq!(contact.last_name, "Q. Public");
/// assert_eq!(contact.email, None);
/// ```
pub fn map_row(row: &[String], mapping: &FieldMapping) -> Option<ContactRecord> {
    let name = read_cell(row, mapping.name);
    let phone = read_cell(row, mapping.phone);

    if name.is_empty() && phone.is_empty() {
        return None;
    }

    let mut tokens = name.split_whitespace();
    let first_name = tokens.next().unwrap_or_default().to_string();
    let last_name = tokens.collect::<Vec<_>>().join(" ");

    let full_name = if name.is_empty() { phone } else { name };

    Some(ContactRecord {
        first_name,
        last_name,
        full_name: full_name.to_string(),
        phone: phone.to_string(),
        email: read_optional(row, mapping.email),
        company: read_optional(row, mapping.company),
        notes: read_optional(row, mapping.notes),
    })
}

/// すべての行を連絡先に変換する（行の順序を保持）
pub fn map_rows(rows: &[Vec<String>], mapping: &FieldMapping) -> Vec<ContactRecord> {
    let contacts: Vec<ContactRecord> = rows
        .iter()
        .filter_map(|row| map_row(row, mapping))
        .collect();

    debug!(
        rows = rows.len(),
        contacts = contacts.len(),
        skipped = rows.len() - contacts.len(),
        "mapped rows to contacts"
    );
    contacts
}

/// すべての連絡先の表示名にラベルを付ける
///
/// ラベルはtrimされ、空の場合は連絡先をそのまま複製して返します。
/// 元のスライスは変更しません。
pub fn apply_label_prefix(contacts: &[ContactRecord], prefix: &str) -> Vec<ContactRecord> {
    contacts
        .iter()
        .map(|contact| contact.with_label_prefix(prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ContactField;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn full_mapping() -> FieldMapping {
        FieldMapping {
            name: Some(0),
            phone: Some(1),
            email: Some(2),
            company: Some(3),
            notes: Some(4),
        }
    }

    #[test]
    fn test_map_full_row() {
        let contact = map_row(
            &row(&["  Jane Q.   Public ", " 555-1234 ", "jane@x.com", "Acme", "VIP"]),
            &full_mapping(),
        )
        .unwrap();

        assert_eq!(contact.first_name, "Jane");
        assert_eq!(contact.last_name, "Q. Public");
        assert_eq!(contact.full_name, "Jane Q.   Public");
        assert_eq!(contact.phone, "555-1234");
        assert_eq!(contact.email.as_deref(), Some("jane@x.com"));
        assert_eq!(contact.company.as_deref(), Some("Acme"));
        assert_eq!(contact.notes.as_deref(), Some("VIP"));
    }

    #[test]
    fn test_single_token_name() {
        let contact = map_row(&row(&["Cher", ""]), &full_mapping()).unwrap();
        assert_eq!(contact.first_name, "Cher");
        assert_eq!(contact.last_name, "");
        assert_eq!(contact.phone, "");
    }

    #[test]
    fn test_phone_only_row_uses_phone_as_name() {
        let contact = map_row(&row(&["", "+1 555 0000"]), &full_mapping()).unwrap();
        assert_eq!(contact.first_name, "");
        assert_eq!(contact.last_name, "");
        assert_eq!(contact.full_name, "+1 555 0000");
    }

    #[test]
    fn test_row_without_name_and_phone_is_dropped() {
        assert!(map_row(&row(&["  ", " ", "a@b.c", "Acme"]), &full_mapping()).is_none());
    }

    #[test]
    fn test_unmapped_and_out_of_range_fields() {
        let mapping = FieldMapping::new()
            .with(ContactField::Name, 0)
            .with(ContactField::Email, 9);
        let contact = map_row(&row(&["Ann", "555"]), &mapping).unwrap();

        assert_eq!(contact.phone, "");
        assert_eq!(contact.email, None);
        assert_eq!(contact.company, None);
    }

    #[test]
    fn test_empty_optional_value_is_absent() {
        let contact = map_row(&row(&["Ann", "555", "   ", "", ""]), &full_mapping()).unwrap();
        assert_eq!(contact.email, None);
        assert_eq!(contact.company, None);
        assert_eq!(contact.notes, None);
    }

    #[test]
    fn test_out_of_range_name_and_phone_drops_row() {
        let mapping = FieldMapping::new()
            .with(ContactField::Name, 7)
            .with(ContactField::Phone, 8);
        assert!(map_row(&row(&["Ann", "555"]), &mapping).is_none());
    }

    #[test]
    fn test_map_rows_preserves_order() {
        let rows = vec![
            row(&["Ann", "1"]),
            row(&["", ""]),
            row(&["Bob", "2"]),
            row(&["", "3"]),
        ];
        let contacts = map_rows(&rows, &full_mapping());
        let names: Vec<&str> = contacts.iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob", "3"]);
    }

    #[test]
    fn test_apply_label_prefix() {
        let contacts = map_rows(&[row(&["Ann", "1"]), row(&["", "2"])], &full_mapping());

        let labeled = apply_label_prefix(&contacts, "  Trade Show ");
        assert_eq!(labeled[0].full_name, "Trade Show - Ann");
        assert_eq!(labeled[1].full_name, "Trade Show - 2");
        assert_eq!(labeled[0].first_name, "Ann");
        assert_eq!(contacts[0].full_name, "Ann");

        assert_eq!(apply_label_prefix(&contacts, ""), contacts);
    }
}
