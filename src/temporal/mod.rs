//! 日付データの解析と表示のためのモジュール

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// 軸ラベルに使う既定の日付書式
pub const DEFAULT_DATE_LABEL_FORMAT: &str = "%Y-%m-%d";

/// 時刻付きの書式（ISO 8601 とその亜種）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// 日付のみの書式
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// 文字列を暦日として解析する
///
/// ISO 8601（年のみ・年月のみ・基本形式 `YYYYMMDD` を含む）と
/// 一般的な日付表記を受け付ける。オフセット付きの時刻は記載された
/// 現地時刻のまま扱う。
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    parse_compact_iso(text).map(|date| date.and_time(NaiveTime::MIN))
}

/// 文字列が暦日として解析できるかどうか
pub fn is_date(text: &str) -> bool {
    parse_date(text).is_some()
}

/// `YYYY`、`YYYY-MM`、`YYYYMMDD` の短縮形式を解析する
fn parse_compact_iso(text: &str) -> Option<NaiveDate> {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    match text.len() {
        4 if all_digits(text) => NaiveDate::from_ymd_opt(text.parse().ok()?, 1, 1),
        7 if text.as_bytes()[4] == b'-' && all_digits(&text[..4]) && all_digits(&text[5..]) => {
            NaiveDate::from_ymd_opt(text[..4].parse().ok()?, text[5..].parse().ok()?, 1)
        }
        8 if all_digits(text) => NaiveDate::from_ymd_opt(
            text[..4].parse().ok()?,
            text[4..6].parse().ok()?,
            text[6..].parse().ok()?,
        ),
        _ => None,
    }
}

/// 書式文字列が chrono で解釈できるかどうか
pub fn is_valid_format(pattern: &str) -> bool {
    !pattern.is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// 日時を軸ラベル用の文字列に整形する
///
/// 書式が不正な場合は `YYYY-MM-DD` で整形する。
pub fn format_date_label(date: &NaiveDateTime, pattern: &str) -> String {
    if is_valid_format(pattern) {
        date.format(pattern).to_string()
    } else {
        date.format(DEFAULT_DATE_LABEL_FORMAT).to_string()
    }
}
