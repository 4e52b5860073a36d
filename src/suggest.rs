//! Column Suggestion Module
//!
//! ヘッダー名から各論理フィールドの列を推定するモジュール。
//! フィールドごとに大文字小文字を区別しない完全一致パターンを持ち、
//! ヘッダーを左から走査して最初に一致した列を採用します。

use once_cell::sync::Lazy;
use regex::RegexSet;
use tracing::debug;

use crate::api::ContactField;
use crate::types::FieldMapping;

const NAME_PATTERNS: &[&str] = &[
    r"name",
    r"full\s*name",
    r"contact\s*name",
    r"client\s*name",
    r"lead\s*name",
    r"customer",
    r"first\s*name",
    r"naam",
    r"nombre",
    r"pr[eé]nom",
    r"nom\s*complet",
    r"名前",
    r"氏名",
];

const PHONE_PATTERNS: &[&str] = &[
    r"phone",
    r"phone\s*number",
    r"mobile",
    r"cell",
    r"t[eé]l[eé]phone",
    r"tel",
    r"contact\s*number",
    r"primary\s*phone",
    r"tel[eé]fono",
    r"電話番号",
];

const EMAIL_PATTERNS: &[&str] = &[r"email", r"e-mail", r"email\s*address", r"mail"];

const COMPANY_PATTERNS: &[&str] = &[
    r"company",
    r"organi[sz]ation",
    r"org",
    r"business",
    r"employer",
    r"workplace",
];

const NOTES_PATTERNS: &[&str] = &[r"notes?", r"comment", r"remarks?", r"description", r"info"];

fn patterns_for(field: ContactField) -> &'static [&'static str] {
    match field {
        ContactField::Name => NAME_PATTERNS,
        ContactField::Phone => PHONE_PATTERNS,
        ContactField::Email => EMAIL_PATTERNS,
        ContactField::Company => COMPANY_PATTERNS,
        ContactField::Notes => NOTES_PATTERNS,
    }
}

// ContactField::ALLと同じ順序
static FIELD_PATTERNS: Lazy<Vec<(ContactField, RegexSet)>> = Lazy::new(|| {
    ContactField::ALL
        .iter()
        .map(|&field| {
            let anchored = patterns_for(field)
                .iter()
                .map(|pattern| format!(r"(?i)^(?:{})$", pattern));
            let set = RegexSet::new(anchored).expect("column header patterns are valid regexes");
            (field, set)
        })
        .collect()
});

fn pattern_set(field: ContactField) -> &'static RegexSet {
    let (_, set) = FIELD_PATTERNS
        .iter()
        .find(|(f, _)| *f == field)
        .expect("every field has a pattern set");
    set
}

/// ヘッダーがフィールドのパターンに一致するかを判定（前後の空白は無視）
pub fn header_matches(field: ContactField, header: &str) -> bool {
    pattern_set(field).is_match(header.trim())
}

/// フィールドに一致する最初の列インデックスを返す
///
/// # 引数
///
/// * `headers` - ヘッダー行
/// * `field` - 探索するフィールド
///
/// # 戻り値
///
/// * `Some(index)` - 左から見て最初に一致したヘッダーの位置
/// * `None` - 一致するヘッダーがない場合
pub fn find_column(headers: &[String], field: ContactField) -> Option<usize> {
    headers
        .iter()
        .position(|header| header_matches(field, header))
}

/// ヘッダー行から列マッピングを推定する
///
/// フィールドは name → phone → email → company → notes の順に独立して
/// 探索され、ある列が一致しても他のフィールドの候補から除外されません。
/// 同じヘッダーに対しては常に同じ結果を返します。
///
/// # 使用例
///
/// ```rust
/// use sheet2vcf::suggest_mapping;
///
/// let headers: Vec<String> = ["Full Name", "Mobile", "Email Address"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let mapping = suggest_mapping(&headers);
/// assert_eq!(mapping.name, Some(0));
/// assert_eq!(mapping.phone, Some(1));
/// assert_eq!(mapping.email, Some(2));
/// assert_eq!(mapping.company, None);
/// ```
pub fn suggest_mapping(headers: &[String]) -> FieldMapping {
    let mut mapping = FieldMapping::new();
    for field in ContactField::ALL {
        mapping.set(field, find_column(headers, field));
    }
    debug!(?mapping, columns = headers.len(), "suggested column mapping");
    mapping
}
