use std::fmt::Display;
use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Reader, Xls, Xlsx};

use crate::dataset::{Dataset, Row};
use crate::error::{Error, Result};
use crate::io::{check_unique_headers, FileFormat};
use crate::value::RawValue;

/// Excel (.xlsx / .xls) ファイルから最初のシートを読み込む
///
/// # 引数
///
/// * `path` - Excelファイルのパス
///
/// # 戻り値
///
/// * `Result<Dataset>` - 読み込んだデータセット、またはエラー
///
/// # 例
///
/// ```no_run
/// use tabviz::io::read_excel;
///
/// let ds = read_excel("data.xlsx").unwrap();
/// println!("{} rows", ds.len());
/// ```
pub fn read_excel<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let format = FileFormat::from_file_name(&path.to_string_lossy())
        .filter(|f| *f != FileFormat::Csv)
        .unwrap_or(FileFormat::Xlsx);
    let bytes = fs::read(path)?;
    read_excel_bytes(&bytes, format)
}

/// Excelファイルのバイト列から最初のシートを読み込む
///
/// 1行目をヘッダーとし、空のヘッダーは `Column{n}` と命名する。
/// すべてのセルが空の行は読み飛ばす。
pub fn read_excel_bytes(bytes: &[u8], format: FileFormat) -> Result<Dataset> {
    let cursor = Cursor::new(bytes);
    match format {
        FileFormat::Xls => {
            let mut workbook: Xls<_> = open_workbook_from_rs(cursor).map_err(excel_error)?;
            read_first_sheet(&mut workbook)
        }
        _ => {
            let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor).map_err(excel_error)?;
            read_first_sheet(&mut workbook)
        }
    }
}

fn excel_error<E: Display>(err: E) -> Error {
    Error::ExcelError(format!("Excelファイルを開けませんでした: {}", err))
}

fn read_first_sheet<R, RS>(workbook: &mut R) -> Result<Dataset>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Display,
{
    // シート名を取得（最初のシート）
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::ExcelError("Excelファイルにシートがありません".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        Error::ExcelError(format!("シート '{}' を読み込めませんでした: {}", sheet_name, e))
    })?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                Data::Empty => format!("Column{}", i + 1),
                other => other.to_string().trim().to_string(),
            })
            .collect(),
        None => return Ok(Dataset::new()),
    };
    check_unique_headers(&headers)?;

    let rows: Vec<Row> = sheet_rows
        .filter(|cells| cells.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.as_str(), cells.get(i).map(to_raw).unwrap_or(RawValue::Null)))
                .collect()
        })
        .collect();

    Ok(Dataset::from_rows(rows))
}

/// セルの値を生の値に変換する
fn to_raw(cell: &Data) -> RawValue {
    match cell {
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Float(f) => RawValue::Number(*f),
        Data::DateTime(dt) => RawValue::Number(dt.as_f64()),
        Data::String(s) if s.is_empty() => RawValue::Null,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => RawValue::Text(s.clone()),
        Data::Bool(b) => RawValue::Bool(*b),
        Data::Error(_) | Data::Empty => RawValue::Null,
    }
}
