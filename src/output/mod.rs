//! Output Module
//!
//! vCard文書の生成と、ダウンロード・共有・埋め込み用の表現を提供するモジュール。
//! このモジュール自体はファイルやネットワークへのI/Oを行いません。

mod vcard;

use std::io::Write;

use base64::prelude::{Engine as _, BASE64_STANDARD};

use crate::error::SheetToVcfError;
use crate::types::ContactRecord;

pub use vcard::{
    clean_phone, escape_text, render_card, render_document, CARD_SEPARATOR, LINE_TERMINATOR,
    VCARD_VERSION,
};

/// vCard文書のメディアタイプ
pub const VCARD_MEDIA_TYPE: &str = "text/vcard;charset=utf-8";

/// 既定のファイル名
pub const DEFAULT_FILE_NAME: &str = "contacts.vcf";

/// QRコードに埋め込める連絡先数の目安
///
/// これを超えると文書がQRコードの容量に収まりません。
/// QRコードの生成自体は呼び出し側の責務です。
pub const QR_CODE_MAX_CONTACTS: usize = 5;

/// 生成済みのvCard文書
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfDocument {
    text: String,
    contact_count: usize,
    file_name: String,
}

impl VcfDocument {
    /// 連絡先のリストから文書を生成する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheet2vcf::{ContactRecord, VcfDocument};
    ///
    /// let contact = ContactRecord {
    ///     first_name: "Ann".to_string(),
    ///     full_name: "Ann".to_string(),
    ///     phone: "555".to_string(),
    ///     ..Default::default()
    /// };
    /// let document = VcfDocument::from_contacts(&[contact]);
    /// assert!(document.text().starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
    /// assert_eq!(document.file_name(), "contacts.vcf");
    /// ```
    pub fn from_contacts(contacts: &[ContactRecord]) -> Self {
        Self {
            text: render_document(contacts),
            contact_count: contacts.len(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// ファイル名を変更したコピーを返す
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// 文書のテキスト
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 文書のUTF-8バイト列
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// 文書をUTF-8バイト列として取り出す（ダウンロード用）
    pub fn into_bytes(self) -> Vec<u8> {
        self.text.into_bytes()
    }

    /// 文書をテキストとして取り出す
    pub fn into_string(self) -> String {
        self.text
    }

    /// 保存時のファイル名
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// メディアタイプ
    pub fn media_type(&self) -> &'static str {
        VCARD_MEDIA_TYPE
    }

    /// 含まれる連絡先の数
    pub fn contact_count(&self) -> usize {
        self.contact_count
    }

    /// QRコードに埋め込める件数かどうか
    pub fn fits_qr_code(&self) -> bool {
        self.contact_count > 0 && self.contact_count <= QR_CODE_MAX_CONTACTS
    }

    /// `data:` URIに変換する
    ///
    /// テキストをUTF-8バイト列にしてからBase64エンコードするため、
    /// アクセント付き文字や非ラテン文字も壊れません。
    ///
    /// ```rust
    /// use sheet2vcf::{ContactRecord, VcfDocument};
    ///
    /// let document = VcfDocument::from_contacts(&[ContactRecord {
    ///     full_name: "José".to_string(),
    ///     ..Default::default()
    /// }]);
    /// assert!(document.to_data_uri().starts_with("data:text/vcard;base64,"));
    /// ```
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:text/vcard;base64,{}",
            BASE64_STANDARD.encode(self.text.as_bytes())
        )
    }

    /// 文書をライターに書き出す
    ///
    /// 書き込みの失敗は`SheetToVcfError::Output`になります。
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), SheetToVcfError> {
        writer
            .write_all(self.text.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(SheetToVcfError::Output)
    }
}
