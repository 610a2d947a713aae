use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Row};
use crate::error::{Error, Result};
use crate::value;

/// 集計結果の値を格納するフィールド名
pub const AGGREGATED_VALUE_FIELD: &str = "aggregatedValue";

/// グループごとの集計方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateKind {
    /// 合計
    #[default]
    Sum,
    /// 平均（グループの行数で割る）
    Mean,
    /// 行数
    Count,
    /// 最小値
    Min,
    /// 最大値
    Max,
}

impl AggregateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateKind::Sum => "sum",
            AggregateKind::Mean => "mean",
            AggregateKind::Count => "count",
            AggregateKind::Min => "min",
            AggregateKind::Max => "max",
        }
    }

    /// 0置換済みの値の列を集計する
    ///
    /// 空の列に対しては合計・行数が0、平均・最小値・最大値も0を返す。
    pub fn apply(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        match self {
            AggregateKind::Sum => values.iter().sum(),
            AggregateKind::Mean => values.iter().sum::<f64>() / values.len() as f64,
            AggregateKind::Count => values.len() as f64,
            AggregateKind::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            AggregateKind::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(AggregateKind::Sum),
            "mean" | "avg" | "average" => Ok(AggregateKind::Mean),
            "count" => Ok(AggregateKind::Count),
            "min" => Ok(AggregateKind::Min),
            "max" => Ok(AggregateKind::Max),
            other => Err(Error::InvalidInput(format!("未知の集計方法です: {}", other))),
        }
    }
}

/// グループ1つ分の集計結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRow {
    /// グループのキー（グループ化列の文字列表現）
    pub group_key: String,
    /// 集計値
    pub aggregated_value: f64,
}

impl AggregatedRow {
    /// グループ化列の名前をキーのフィールド名とした行に変換
    pub fn to_row(&self, group_column: &str) -> Row {
        Row::new()
            .with(group_column, self.group_key.as_str())
            .with(AGGREGATED_VALUE_FIELD, self.aggregated_value)
    }
}

/// データセットを1列の値でグループ化した結果
///
/// グループは最初に現れた順に並ぶ。
#[derive(Debug)]
pub struct DatasetGroupBy<'a> {
    /// グループのキー（出現順）
    keys: Vec<String>,

    /// キーごとの行インデックス
    groups: HashMap<String, Vec<usize>>,

    /// 元のデータセット
    source: &'a Dataset,

    /// グループ化に使用した列名
    by: String,
}

impl<'a> DatasetGroupBy<'a> {
    /// 新しいグループを作成
    ///
    /// 列が存在しない場合は `None` を返す。
    pub fn new(source: &'a Dataset, by: &str) -> Option<Self> {
        if by.trim().is_empty() || !source.has_column(by) {
            return None;
        }

        let mut keys = Vec::new();
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, cell) in source.column_values(by).enumerate() {
            let key = cell.map(|v| v.to_label()).unwrap_or_default();
            groups
                .entry(key)
                .or_insert_with_key(|key| {
                    keys.push(key.clone());
                    Vec::new()
                })
                .push(i);
        }

        Some(DatasetGroupBy {
            keys,
            groups,
            source,
            by: by.to_string(),
        })
    }

    /// グループ化に使用した列名
    pub fn by(&self) -> &str {
        &self.by
    }

    /// グループ数を取得
    pub fn group_count(&self) -> usize {
        self.keys.len()
    }

    /// グループのキーを出現順に返す
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// 各グループのサイズを返す
    pub fn size(&self) -> HashMap<String, usize> {
        self.groups
            .iter()
            .map(|(k, indices)| (k.clone(), indices.len()))
            .collect()
    }

    /// 各グループの値列を集計する
    ///
    /// 数値に変換できない値は0として扱い、行数には含める。
    pub fn aggregate(&self, value_column: &str, kind: AggregateKind) -> Vec<AggregatedRow> {
        self.keys
            .iter()
            .map(|key| {
                let indices = &self.groups[key];
                let values = value::coerce_zero(
                    indices
                        .iter()
                        .map(|&i| self.source.row(i).and_then(|row| row.get(value_column))),
                );
                AggregatedRow {
                    group_key: key.clone(),
                    aggregated_value: kind.apply(&values),
                }
            })
            .collect()
    }
}

/// データセットをグループ化して値列を集計する
///
/// データセットが空、またはどちらかの列名が空・存在しない場合は空の結果を返す。
pub fn group_and_aggregate(
    dataset: &Dataset,
    group_by_column: &str,
    value_column: &str,
    kind: AggregateKind,
) -> Vec<AggregatedRow> {
    if dataset.is_empty() || value_column.trim().is_empty() || !dataset.has_column(value_column) {
        return Vec::new();
    }
    DatasetGroupBy::new(dataset, group_by_column)
        .map(|groups| groups.aggregate(value_column, kind))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_on_empty() {
        for kind in [
            AggregateKind::Sum,
            AggregateKind::Mean,
            AggregateKind::Count,
            AggregateKind::Min,
            AggregateKind::Max,
        ] {
            assert_eq!(kind.apply(&[]), 0.0);
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Mean".parse::<AggregateKind>().unwrap(), AggregateKind::Mean);
        assert_eq!(" count ".parse::<AggregateKind>().unwrap(), AggregateKind::Count);
        assert!("median".parse::<AggregateKind>().is_err());
    }

    #[test]
    fn test_to_row() {
        let row = AggregatedRow {
            group_key: "a".into(),
            aggregated_value: 1.5,
        }
        .to_row("region");

        assert_eq!(row.get("region").unwrap().to_label(), "a");
        assert_eq!(row.get(AGGREGATED_VALUE_FIELD).unwrap().to_number(), Some(1.5));
    }
}
