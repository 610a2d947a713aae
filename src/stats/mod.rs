// 統計モジュール
//
// 記述統計量（合計・平均・中央値・最小値・最大値・標準偏差）と
// 2系列間の相関係数を計算します。どちらの関数も失敗せず、
// 計算できない場合は NA を返します。

pub mod descriptive;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::na::NA;
use crate::value::{self, RawValue};

/// 記述統計量の結果を保持する構造体
///
/// すべてのフィールドが値を持つか、すべてが NA かのどちらか。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    /// 合計
    pub sum: NA<f64>,
    /// 平均値
    pub mean: NA<f64>,
    /// 中央値（偶数個の場合は中央2値の平均）
    pub median: NA<f64>,
    /// 最小値
    pub min: NA<f64>,
    /// 最大値
    pub max: NA<f64>,
    /// 標準偏差（母標準偏差、n で割る）
    pub std_dev: NA<f64>,
}

impl StatisticsSummary {
    /// すべて NA の統計量
    pub fn unavailable() -> Self {
        StatisticsSummary {
            sum: NA::NA,
            mean: NA::NA,
            median: NA::NA,
            min: NA::NA,
            max: NA::NA,
            std_dev: NA::NA,
        }
    }

    /// 統計量が計算済みかどうか
    pub fn is_available(&self) -> bool {
        self.sum.is_value()
    }
}

impl Default for StatisticsSummary {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// 生の値の列から記述統計量を計算
///
/// # 説明
/// 各値を浮動小数点数に変換し、変換できない値（数値でない文字列、
/// 空欄、無限大など）は黙って除外します。残った値が0個の場合は
/// すべてのフィールドが NA になります。
///
/// # 例
/// ```rust
/// use tabviz::stats;
/// use tabviz::value::RawValue;
///
/// let values: Vec<RawValue> = vec!["1".into(), "2".into(), "x".into(), 3.0.into()];
/// let summary = stats::descriptive_statistics(&values);
/// assert_eq!(summary.sum.get(), Some(6.0));
/// ```
pub fn descriptive_statistics(values: &[RawValue]) -> StatisticsSummary {
    summarize(&value::coerce_drop(values.iter().map(Some)))
}

/// データセットの1列について記述統計量を計算
pub fn describe_column(dataset: &Dataset, column: &str) -> StatisticsSummary {
    if !dataset.has_column(column) {
        return StatisticsSummary::unavailable();
    }
    summarize(&value::coerce_drop(dataset.column_values(column)))
}

/// 数値の列から記述統計量を計算
pub fn summarize(values: &[f64]) -> StatisticsSummary {
    descriptive::summarize_impl(values)
}

/// 相関係数を計算
///
/// # 説明
/// 同じ位置の値を1組の観測 (x, y) とみなし、ピアソンの相関係数を
/// 計算します。どちらか一方でも数値に変換できない組は組ごと除外するため、
/// x と y の対応がずれることはありません。
///
/// 次の場合は NA を返します。
/// - どちらかの列が空、または元の長さが異なる
/// - 除外後に残った組が2組未満
/// - どちらかの分散がゼロ
///
/// # 例
/// ```rust
/// use tabviz::stats;
/// use tabviz::value::RawValue;
///
/// let x: Vec<RawValue> = vec![1.0.into(), 2.0.into(), 3.0.into()];
/// let y: Vec<RawValue> = vec![2.0.into(), 4.0.into(), 6.0.into()];
/// let r = stats::correlation(&x, &y);
/// assert!((r.get().unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn correlation(xs: &[RawValue], ys: &[RawValue]) -> NA<f64> {
    if xs.is_empty() || ys.is_empty() || xs.len() != ys.len() {
        return NA::NA;
    }
    let (x, y) = paired_numbers(xs.iter().map(Some).zip(ys.iter().map(Some)));
    pearson(&x, &y)
}

/// 数値の組からピアソンの相関係数を計算
pub fn pearson(x: &[f64], y: &[f64]) -> NA<f64> {
    descriptive::correlation_impl(x, y)
}

/// 両方が数値に変換できる組だけを残し、x と y に分けて返す
pub fn paired_numbers<'a, I>(pairs: I) -> (Vec<f64>, Vec<f64>)
where
    I: IntoIterator<Item = (Option<&'a RawValue>, Option<&'a RawValue>)>,
{
    pairs
        .into_iter()
        .filter_map(|(x, y)| Some((value::to_number(x)?, value::to_number(y)?)))
        .unzip()
}
