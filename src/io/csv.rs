use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::dataset::{Dataset, Row};
use crate::error::{Error, Result};
use crate::io::check_unique_headers;
use crate::value::RawValue;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSVファイルからデータセットを読み込む
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    read_csv_reader(file)
}

/// CSVのバイト列からデータセットを読み込む
pub fn read_csv_bytes(bytes: &[u8]) -> Result<Dataset> {
    read_csv_reader(bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes))
}

/// CSVを読み込む
///
/// 1行目をヘッダーとし、各セルは前後の空白を取り除いた文字列として保持する。
/// 空のセルは `Null`、すべてのセルが空の行は読み飛ばす。
/// ヘッダーより短い行は不足分を `Null` で埋め、長い行の余分なセルは捨てる。
pub fn read_csv_reader<R: Read>(reader: R) -> Result<Dataset> {
    // CSVリーダーを設定
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // ヘッダー行を取得
    let headers: Vec<String> = rdr
        .headers()
        .map_err(Error::Csv)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        // ファイルが空の場合
        return Ok(Dataset::new());
    }
    check_unique_headers(&headers)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(Error::Csv)?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let cell = match record.get(i) {
                    Some(field) if !field.is_empty() => RawValue::Text(field.to_string()),
                    _ => RawValue::Null,
                };
                (header.as_str(), cell)
            })
            .collect();
        rows.push(row);
    }

    Ok(Dataset::from_rows(rows))
}
