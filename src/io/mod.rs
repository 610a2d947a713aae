//! ファイル読み込み（CSV / Excel）
//!
//! アップロードされたファイルをファイル名の拡張子で判別し、行の列に変換する。

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;

use std::fs;
use std::path::Path;

use log::warn;

use crate::dataset::Dataset;
use crate::error::{Error, Result};

// Re-export commonly used functions
pub use self::csv::{read_csv, read_csv_bytes};
#[cfg(feature = "excel")]
pub use self::excel::{read_excel, read_excel_bytes};

/// 対応するファイル形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xls,
}

impl FileFormat {
    /// ファイル名の拡張子から形式を判別する（大文字小文字は区別しない）
    pub fn from_file_name(name: &str) -> Option<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(FileFormat::Csv),
            "xlsx" => Some(FileFormat::Xlsx),
            "xls" => Some(FileFormat::Xls),
            _ => None,
        }
    }
}

/// 読み込み結果：元のファイル名とデータセット
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub name: String,
    pub dataset: Dataset,
}

/// ファイルの内容を形式に応じて読み込む
///
/// # 引数
///
/// * `name` - 元のファイル名（拡張子で形式を判別する）
/// * `bytes` - ファイルの内容
///
/// # 戻り値
///
/// * `Result<ParsedFile>` - 読み込んだデータセット、またはエラー
///
/// # 例
///
/// ```
/// use tabviz::io::parse_file;
///
/// let parsed = parse_file("sales.csv", b"month,total\nJan,10\nFeb,12\n").unwrap();
/// assert_eq!(parsed.dataset.len(), 2);
/// assert_eq!(parsed.name, "sales.csv");
/// ```
pub fn parse_file(name: &str, bytes: &[u8]) -> Result<ParsedFile> {
    let dataset = match FileFormat::from_file_name(name) {
        Some(FileFormat::Csv) => read_csv_bytes(bytes)?,
        #[cfg(feature = "excel")]
        Some(format @ (FileFormat::Xlsx | FileFormat::Xls)) => read_excel_bytes(bytes, format)?,
        #[cfg(not(feature = "excel"))]
        Some(FileFormat::Xlsx | FileFormat::Xls) => {
            return Err(Error::UnsupportedFormat(format!(
                "{} (Excel support is disabled)",
                name
            )))
        }
        None => {
            warn!("unsupported upload: {}", name);
            return Err(Error::UnsupportedFormat(name.to_string()));
        }
    };

    Ok(ParsedFile {
        name: name.to_string(),
        dataset,
    })
}

/// パスからファイルを読み込む
pub fn parse_path<P: AsRef<Path>>(path: P) -> Result<ParsedFile> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::IoError(format!("ファイル名を取得できません: {}", path.display())))?;
    parse_file(name, &bytes)
}

/// ヘッダーの重複を検査する
pub(crate) fn check_unique_headers(headers: &[String]) -> Result<()> {
    for (i, header) in headers.iter().enumerate() {
        if headers[..i].contains(header) {
            return Err(Error::DuplicateColumnName(header.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(FileFormat::from_file_name("a.csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_file_name("Report.XLSX"), Some(FileFormat::Xlsx));
        assert_eq!(FileFormat::from_file_name("old.xls"), Some(FileFormat::Xls));
        assert_eq!(FileFormat::from_file_name("notes.txt"), None);
        assert_eq!(FileFormat::from_file_name("csv"), None);
    }

    #[test]
    fn test_unsupported_format() {
        assert!(matches!(
            parse_file("data.json", b"[]"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_duplicate_headers() {
        let headers = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert!(matches!(
            check_unique_headers(&headers),
            Err(Error::DuplicateColumnName(name)) if name == "a"
        ));
    }
}
