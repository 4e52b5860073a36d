//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::api::InputFormat;
use crate::error::SheetToVcfError;
use crate::mapper;
use crate::output::{VcfDocument, DEFAULT_FILE_NAME};
use crate::parser;
use crate::types::{ContactRecord, FieldMapping, SpreadsheetData};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConversionConfig {
    /// CSVの区切り文字
    pub delimiter: u8,

    /// 表示名に付けるラベル（trim済み、空なら付けない）
    pub label_prefix: String,

    /// 出力ファイル名
    pub file_name: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            label_prefix: String::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use sheet2vcf::ConverterBuilder;
///
/// # fn main() -> Result<(), sheet2vcf::SheetToVcfError> {
/// let converter = ConverterBuilder::new()
///     .with_delimiter(b';')
///     .with_label_prefix("Expo 2026")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 区切り文字: `,`
    /// - ラベル: なし
    /// - ファイル名: `contacts.vcf`
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// CSVの区切り文字を指定する
    ///
    /// ASCII文字のみ指定できます。二重引用符と改行は`build()`でエラーになります。
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// 出力時に表示名へ付けるラベルを指定する
    ///
    /// 表示名は`"<ラベル> - <元の表示名>"`になります。前後の空白は除去され、
    /// 空のラベルは無視されます。
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.label_prefix = prefix.into().trim().to_string();
        self
    }

    /// 出力ファイル名を指定する
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.config.file_name = file_name.into();
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `SheetToVcfError::Config(String)`: 設定の検証に失敗した場合
    ///   * 区切り文字がASCII以外、二重引用符、改行のいずれか
    ///   * ファイル名が空
    pub fn build(self) -> Result<Converter, SheetToVcfError> {
        // 1. 区切り文字の検証
        let delimiter = self.config.delimiter;
        if !delimiter.is_ascii() || matches!(delimiter, b'"' | b'\n' | b'\r') {
            return Err(SheetToVcfError::Config(format!(
                "Invalid delimiter: {:?}",
                delimiter as char
            )));
        }

        // 2. ファイル名の検証
        if self.config.file_name.trim().is_empty() {
            return Err(SheetToVcfError::Config(
                "File name must not be empty".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// 取り込み → 列マッピング → vCard生成の各段階を個別に、または
/// `convert()`でまとめて実行できます。ワークフローの状態（読み込んだ表や
/// 編集中のマッピング）は呼び出し側が保持します。
///
/// # 使用例
///
/// ```rust
/// use sheet2vcf::{ConverterBuilder, InputFormat};
///
/// # fn main() -> Result<(), sheet2vcf::SheetToVcfError> {
/// let converter = ConverterBuilder::new().build()?;
/// let csv = "Full Name,Mobile\nJane Q. Public,555-1234\n";
///
/// let vcf = converter.convert_to_string(csv.as_bytes(), InputFormat::Csv)?;
/// assert!(vcf.contains("TEL;type=CELL:5551234\r\n"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// 入力を読み込み、表と推定マッピングを返す
    ///
    /// # 引数
    ///
    /// * `input` - 入力ファイルを読み込むためのリーダー
    /// * `format` - 入力形式
    pub fn load<R: Read>(
        &self,
        mut input: R,
        format: InputFormat,
    ) -> Result<SpreadsheetData, SheetToVcfError> {
        let mut buffer = Vec::new();
        input.read_to_end(&mut buffer)?;
        parser::parse(&buffer, format, self.config.delimiter)
    }

    /// ファイルを読み込む（入力形式は拡張子から判定）
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<SpreadsheetData, SheetToVcfError> {
        let format = InputFormat::from_path(&path)?;
        let buffer = fs::read(path)?;
        parser::parse(&buffer, format, self.config.delimiter)
    }

    /// 各行に列マッピングを適用して連絡先を構築する
    ///
    /// ラベルはここでは付けません（プレビューには元の表示名を使うため）。
    pub fn map_rows(&self, rows: &[Vec<String>], mapping: &FieldMapping) -> Vec<ContactRecord> {
        mapper::map_rows(rows, mapping)
    }

    /// 連絡先からvCard文書を生成する（設定のラベルとファイル名を適用）
    pub fn render(&self, contacts: &[ContactRecord]) -> VcfDocument {
        let labeled = mapper::apply_label_prefix(contacts, &self.config.label_prefix);
        VcfDocument::from_contacts(&labeled).with_file_name(self.config.file_name.clone())
    }

    /// 入力を読み込み、推定マッピングでvCardに変換して書き出す
    ///
    /// # 戻り値
    ///
    /// * `Ok(usize)` - 出力した連絡先の数
    /// * `Err(SheetToVcfError::MappingValidation)` - 名前列・電話列を推定できない場合
    /// * `Err(SheetToVcfError::Output)` - 書き出しに失敗した場合
    /// * `Err(SheetToVcfError)` - 入力の解析に失敗した場合
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        format: InputFormat,
        output: W,
    ) -> Result<usize, SheetToVcfError> {
        let data = self.load(input, format)?;
        self.write_document(&data, &data.suggested_mapping, output)
    }

    /// 列マッピングを指定して変換する
    pub fn convert_with_mapping<R: Read, W: Write>(
        &self,
        input: R,
        format: InputFormat,
        mapping: &FieldMapping,
        output: W,
    ) -> Result<usize, SheetToVcfError> {
        let data = self.load(input, format)?;
        self.write_document(&data, mapping, output)
    }

    /// 入力をvCard文字列に変換する（推定マッピングを使用）
    pub fn convert_to_string<R: Read>(
        &self,
        input: R,
        format: InputFormat,
    ) -> Result<String, SheetToVcfError> {
        let data = self.load(input, format)?;
        data.suggested_mapping.validate()?;
        let contacts = self.map_rows(&data.table.rows, &data.suggested_mapping);
        Ok(self.render(&contacts).into_string())
    }

    fn write_document<W: Write>(
        &self,
        data: &SpreadsheetData,
        mapping: &FieldMapping,
        output: W,
    ) -> Result<usize, SheetToVcfError> {
        mapping.validate()?;

        let contacts = self.map_rows(&data.table.rows, mapping);
        let document = self.render(&contacts);
        document.write_to(output)?;

        debug!(
            contacts = document.contact_count(),
            bytes = document.as_bytes().len(),
            "wrote vcard document"
        );
        Ok(document.contact_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ContactField;

    #[test]
    fn test_converter_builder_new() {
        let builder = ConverterBuilder::new();
        assert_eq!(builder.config.delimiter, b',');
        assert!(builder.config.label_prefix.is_empty());
        assert_eq!(builder.config.file_name, "contacts.vcf");
    }

    #[test]
    fn test_with_label_prefix_is_trimmed() {
        let builder = ConverterBuilder::new().with_label_prefix("  Expo  ");
        assert_eq!(builder.config.label_prefix, "Expo");
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = ConverterBuilder::new()
            .with_delimiter(b'\t')
            .with_label_prefix("VIP")
            .with_file_name("vip.vcf");

        assert_eq!(builder.config.delimiter, b'\t');
        assert_eq!(builder.config.label_prefix, "VIP");
        assert_eq!(builder.config.file_name, "vip.vcf");
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_build_with_invalid_delimiter() {
        for delimiter in [b'"', b'\n', b'\r', 0xE9] {
            let result = ConverterBuilder::new().with_delimiter(delimiter).build();
            match result {
                Err(SheetToVcfError::Config(msg)) => assert!(msg.contains("Invalid delimiter")),
                _ => panic!("Expected Config error for {:?}", delimiter),
            }
        }
    }

    #[test]
    fn test_build_with_empty_file_name() {
        let result = ConverterBuilder::new().with_file_name("  ").build();
        assert!(matches!(result, Err(SheetToVcfError::Config(_))));
    }

    #[test]
    fn test_render_applies_prefix_without_touching_contacts() {
        let converter = ConverterBuilder::new()
            .with_label_prefix("Expo")
            .with_file_name("expo.vcf")
            .build()
            .unwrap();
        let contacts = vec![ContactRecord {
            first_name: "Ann".to_string(),
            full_name: "Ann".to_string(),
            ..Default::default()
        }];

        let document = converter.render(&contacts);
        assert!(document.text().contains("FN:Expo - Ann\r\n"));
        assert!(document.text().contains("N:;Ann;;;\r\n"));
        assert_eq!(document.file_name(), "expo.vcf");
        assert_eq!(contacts[0].full_name, "Ann");
    }

    #[test]
    fn test_convert_counts_contacts() {
        let converter = ConverterBuilder::new().build().unwrap();
        let csv = "Name,Phone\nAnn,1\n,\nBob,2\n";
        let mut output = Vec::new();

        let count = converter
            .convert(csv.as_bytes(), InputFormat::Csv, &mut output)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(output).unwrap().matches("BEGIN:VCARD").count(), 2);
    }

    #[test]
    fn test_convert_without_identifying_columns() {
        let converter = ConverterBuilder::new().build().unwrap();
        let csv = "Email,Company\na@b.c,Acme\n";

        let result = converter.convert_to_string(csv.as_bytes(), InputFormat::Csv);
        assert!(matches!(result, Err(SheetToVcfError::MappingValidation(_))));
    }

    #[test]
    fn test_convert_with_mapping_override() {
        let converter = ConverterBuilder::new().build().unwrap();
        let csv = "Who,Digits\nAnn,555\n";
        let mapping = FieldMapping::new()
            .with(ContactField::Name, 0)
            .with(ContactField::Phone, 1);
        let mut output = Vec::new();

        converter
            .convert_with_mapping(csv.as_bytes(), InputFormat::Csv, &mapping, &mut output)
            .unwrap();
        let vcf = String::from_utf8(output).unwrap();
        assert!(vcf.contains("FN:Ann\r\nTEL;type=CELL:555\r\n"));
    }

    #[test]
    fn test_convert_to_string_with_invalid_input() {
        let converter = ConverterBuilder::new().build().unwrap();
        let result =
            converter.convert_to_string(std::io::Cursor::new(Vec::new()), InputFormat::Workbook);
        assert!(result.is_err());
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_convert_output_failure_is_not_parse_error() {
        let converter = ConverterBuilder::new().build().unwrap();
        let csv = "Name,Phone\nAnn,555\n";

        let err = converter
            .convert(csv.as_bytes(), InputFormat::Csv, ClosedPipe)
            .unwrap_err();
        assert!(matches!(err, SheetToVcfError::Output(_)));
        assert!(!err.is_parse_error());
    }
}
