use thiserror::Error;

/// エラー型の定義
///
/// 解析エンジン本体（型推論・統計・集計・系列構築）はエラーを返さず、
/// `NA` や空の結果で表現する。ここに定義するのはファイル読み込み、
/// 永続化、設定読み込みといった外部との境界で発生するエラーのみ。
#[derive(Error, Debug)]
pub enum Error {
    #[error("入出力エラー: {0}")]
    IoError(String),

    #[error("Excelエラー: {0}")]
    ExcelError(String),

    #[error("サポートされていないファイル形式です: {0}")]
    UnsupportedFormat(String),

    #[error("データがありません: {0}")]
    EmptyData(String),

    #[error("無効な入力です: {0}")]
    InvalidInput(String),

    #[error("列名が重複しています: {0}")]
    DuplicateColumnName(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ストレージエラー: {0}")]
    Storage(#[from] StorageError),

    #[error("入出力エラー")]
    Io(#[source] std::io::Error),

    #[error("CSVエラー")]
    Csv(#[source] csv::Error),

    #[error("JSONエラー")]
    Json(#[source] serde_json::Error),
}

/// キー・バリューストアで発生するエラー
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("保存容量を超えました: 必要 {required} バイト, 残り {available} バイト")]
    QuotaExceeded { required: usize, available: usize },

    #[error("キーが不正です: {0}")]
    InvalidKey(String),

    #[error("保存先にアクセスできません: {0}")]
    Backend(String),
}

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(format!("TOMLの解析に失敗しました: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(format!("YAMLの解析に失敗しました: {}", err))
    }
}

