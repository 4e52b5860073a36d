//! vCard Serializer
//!
//! 連絡先をvCard 3.0形式のテキストに変換します。
//! 行末はすべてCRLF、カード間は空行1つ、文書末尾にCRLFを付けます。
//! 一部の連絡先アプリは区切りの空行や末尾の改行がないと読み込みに失敗します。

use crate::types::ContactRecord;

/// vCardのバージョン（固定）
pub const VCARD_VERSION: &str = "3.0";

/// 行末
pub const LINE_TERMINATOR: &str = "\r\n";

/// カード間の区切り（空行1つ）
pub const CARD_SEPARATOR: &str = "\r\n\r\n";

/// vCardのテキスト値をエスケープする
///
/// `\` → `\\`、`;` → `\;`、`,` → `\,`、改行 → `\n` の順に置換します。
/// CRLFおよび単独のCRも`\n`として扱います。
///
/// ```rust
/// use sheet2vcf::escape_text;
///
/// assert_eq!(escape_text("Smith; Jr, \\ III\nline"), "Smith\\; Jr\\, \\\\ III\\nline");
/// ```
pub fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "\\n")
}

/// 電話番号を整形する
///
/// 数字と`+`以外の文字を除去します。先頭以外に`+`が現れた場合は
/// すべての`+`を除去します。数字が1つも残らない場合は`None`です。
///
/// ```rust
/// use sheet2vcf::clean_phone;
///
/// assert_eq!(clean_phone("+1 (555) 000-0000").as_deref(), Some("+15550000000"));
/// assert_eq!(clean_phone("12-34+56").as_deref(), Some("123456"));
/// assert_eq!(clean_phone("n/a"), None);
/// ```
pub fn clean_phone(raw: &str) -> Option<String> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    let cleaned = if kept.chars().skip(1).any(|c| c == '+') {
        kept.replace('+', "")
    } else {
        kept
    };

    if cleaned.chars().any(|c| c.is_ascii_digit()) {
        Some(cleaned)
    } else {
        None
    }
}

/// 1件の連絡先をカードに変換する（最終行の後ろにCRLFは付けない）
///
/// 行の順序は BEGIN, VERSION, N, FN, TEL, EMAIL, ORG, NOTE, END で固定です。
/// TEL・EMAIL・ORG・NOTEは値がある場合のみ出力します。
pub fn render_card(contact: &ContactRecord) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCARD".to_string(),
        format!("VERSION:{}", VCARD_VERSION),
        format!(
            "N:{};{};;;",
            escape_text(&contact.last_name),
            escape_text(&contact.first_name)
        ),
        format!("FN:{}", escape_text(&contact.full_name)),
    ];

    if let Some(phone) = clean_phone(&contact.phone) {
        lines.push(format!("TEL;type=CELL:{}", phone));
    }

    // '@'を含まない値は明らかにメールアドレスではない
    if let Some(email) = contact.email.as_deref().filter(|e| e.contains('@')) {
        lines.push(format!("EMAIL:{}", escape_text(email)));
    }

    if let Some(company) = contact.company.as_deref() {
        lines.push(format!("ORG:{}", escape_text(company)));
    }

    if let Some(notes) = contact.notes.as_deref() {
        lines.push(format!("NOTE:{}", escape_text(notes)));
    }

    lines.push("END:VCARD".to_string());
    lines.join(LINE_TERMINATOR)
}

/// 連絡先のリストをvCard文書に変換する
///
/// 2件の場合、`card1 + "\r\n\r\n" + card2 + "\r\n"`になります。
/// 連絡先が0件の場合は空文字列です。
pub fn render_document(contacts: &[ContactRecord]) -> String {
    if contacts.is_empty() {
        return String::new();
    }

    let cards: Vec<String> = contacts.iter().map(render_card).collect();
    let mut document = cards.join(CARD_SEPARATOR);
    document.push_str(LINE_TERMINATOR);
    document
}
