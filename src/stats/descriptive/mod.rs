// 記述統計モジュール

use crate::na::NA;
use crate::stats::StatisticsSummary;

/// 記述統計量を計算する内部実装
pub(crate) fn summarize_impl(data: &[f64]) -> StatisticsSummary {
    if data.is_empty() || data.iter().any(|v| !v.is_finite()) {
        return StatisticsSummary::unavailable();
    }

    let count = data.len() as f64;

    let sum = data.iter().sum::<f64>();
    let mean = sum / count;

    // 標準偏差の計算（母分散、n で割る）
    let variance = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / count;
    let std_dev = variance.sqrt();

    // データをソートして中央値を計算
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let min = sorted[0];
    let max = sorted[n - 1];
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let summary = StatisticsSummary {
        sum: NA::finite(sum),
        mean: NA::finite(mean),
        median: NA::finite(median),
        min: NA::finite(min),
        max: NA::finite(max),
        std_dev: NA::finite(std_dev),
    };

    // 桁あふれした場合も全フィールドを NA に揃える
    if [summary.sum, summary.mean, summary.median, summary.std_dev]
        .iter()
        .any(NA::is_na)
    {
        return StatisticsSummary::unavailable();
    }
    summary
}

/// 相関係数を計算する内部実装
pub(crate) fn correlation_impl(x: &[f64], y: &[f64]) -> NA<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return NA::NA;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    // 分子: Σ(xi - x̄)(yi - ȳ)
    let numerator = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>();

    // 分母: √[Σ(xi - x̄)² * Σ(yi - ȳ)²]
    let sum_squared_diff_x = x.iter().map(|&xi| (xi - mean_x).powi(2)).sum::<f64>();
    let sum_squared_diff_y = y.iter().map(|&yi| (yi - mean_y).powi(2)).sum::<f64>();

    // 分散ゼロは値の一致で判定する
    let constant = |v: &[f64]| v.iter().all(|&a| a == v[0]);
    if constant(x) || constant(y) || sum_squared_diff_x == 0.0 || sum_squared_diff_y == 0.0 {
        return NA::NA;
    }

    // 平方根は別々に取る（積はアンダーフローしうる）
    let denominator = sum_squared_diff_x.sqrt() * sum_squared_diff_y.sqrt();
    if !denominator.is_finite() || denominator == 0.0 {
        return NA::NA;
    }

    // 丸め誤差で [-1, 1] をわずかに超えることがある
    NA::finite((numerator / denominator).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_basic() {
        let stats = summarize_impl(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(stats.sum.get(), Some(15.0));
        assert_eq!(stats.mean.get(), Some(3.0));
        assert_eq!(stats.median.get(), Some(3.0));
        assert_eq!(stats.min.get(), Some(1.0));
        assert_eq!(stats.max.get(), Some(5.0));
        assert!((stats.std_dev.get().unwrap() - 2.0_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_summarize_unsorted_even() {
        let stats = summarize_impl(&[9.0, -1.0, 4.0, 2.0]);
        assert_eq!(stats.median.get(), Some(3.0));
        assert_eq!(stats.min.get(), Some(-1.0));
        assert_eq!(stats.max.get(), Some(9.0));
    }

    #[test]
    fn test_summarize_single_value() {
        let stats = summarize_impl(&[7.0]);
        assert_eq!(stats.median.get(), Some(7.0));
        assert_eq!(stats.std_dev.get(), Some(0.0));
    }

    #[test]
    fn test_summarize_empty() {
        assert!(!summarize_impl(&[]).is_available());
    }

    #[test]
    fn test_summarize_overflow_degrades() {
        let stats = summarize_impl(&[f64::MAX, f64::MAX]);
        assert_eq!(stats, StatisticsSummary::unavailable());
    }

    #[test]
    fn test_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let corr = correlation_impl(&x, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((corr.get().unwrap() - 1.0).abs() < 1e-10);

        let corr_neg = correlation_impl(&x, &[5.0, 4.0, 3.0, 2.0, 1.0]);
        assert!((corr_neg.get().unwrap() + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_correlation_degenerate() {
        assert!(correlation_impl(&[1.0], &[2.0]).is_na());
        assert!(correlation_impl(&[1.0, 2.0], &[1.0]).is_na());
        // 分散ゼロ
        assert!(correlation_impl(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).is_na());
        // 平均が丸められる定数列
        assert!(correlation_impl(&[0.1, 0.1, 0.1], &[1.0, 2.0, 4.0]).is_na());
    }

    #[test]
    fn test_correlation_small_magnitude() {
        let corr = correlation_impl(&[1e-9, 2e-9, 3e-9], &[2e-9, 4e-9, 6e-9]);
        assert!((corr.get().unwrap() - 1.0).abs() < 1e-9);

        // 分散の積が f64 の最小値を下回っても計算できる
        let corr = correlation_impl(&[1e-100, 2e-100, 3e-100], &[3e-100, 2e-100, 1e-100]);
        assert!((corr.get().unwrap() + 1.0).abs() < 1e-9);
    }
}
