use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 計算できない値（NA, Not Available）を表現する型
///
/// 統計量や相関係数が求められない場合（入力が空、長さ不一致、分散ゼロなど）、
/// エラーではなく `NA::NA` を返す。JSONでは `null` として直列化される。
#[derive(Clone, Copy)]
pub enum NA<T> {
    /// 値が存在する場合
    Value(T),
    /// 値が存在しない場合
    NA,
}

impl<T> NA<T> {
    /// 値がないかどうかをチェック
    pub fn is_na(&self) -> bool {
        match self {
            NA::Value(_) => false,
            NA::NA => true,
        }
    }

    /// 値があるかどうかをチェック
    pub fn is_value(&self) -> bool {
        !self.is_na()
    }

    /// 値を取得（存在する場合）
    pub fn value(&self) -> Option<&T> {
        match self {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }

    /// 値を変換する
    pub fn map<U, F>(&self, f: F) -> NA<U>
    where
        F: FnOnce(&T) -> U,
    {
        match self {
            NA::Value(v) => NA::Value(f(v)),
            NA::NA => NA::NA,
        }
    }
}

impl NA<f64> {
    /// 有限の値のみを `Value` とし、NaN や無限大は `NA` に落とす
    pub fn finite(value: f64) -> Self {
        if value.is_finite() {
            NA::Value(value)
        } else {
            NA::NA
        }
    }

    /// 値をコピーして取り出す
    pub fn get(&self) -> Option<f64> {
        match self {
            NA::Value(v) => Some(*v),
            NA::NA => None,
        }
    }
}

impl<T> Default for NA<T> {
    fn default() -> Self {
        NA::NA
    }
}

// From実装：Option<T>からNA<T>への自動変換
impl<T> From<Option<T>> for NA<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => NA::Value(v),
            None => NA::NA,
        }
    }
}

// NA<T>からOption<T>への自動変換
impl<T> From<NA<T>> for Option<T> {
    fn from(na: NA<T>) -> Self {
        match na {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }
}

impl<T: Debug> Debug for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{:?}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

impl<T: Display> Display for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

impl<T: PartialEq> PartialEq for NA<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NA::Value(a), NA::Value(b)) => a == b,
            (NA::NA, NA::NA) => true,
            _ => false,
        }
    }
}

impl<T: PartialOrd> PartialOrd for NA<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (NA::Value(a), NA::Value(b)) => a.partial_cmp(b),
            (NA::NA, NA::NA) => Some(Ordering::Equal),
            (NA::NA, _) => Some(Ordering::Less), // NAは常に他の値より小さいと定義
            (_, NA::NA) => Some(Ordering::Greater),
        }
    }
}

// 直列化はOption<T>と同じ表現（NAはnull）
impl<T: Serialize> Serialize for NA<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            NA::Value(v) => serializer.serialize_some(v),
            NA::NA => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NA<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(NA::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_rejects_nan_and_infinity() {
        assert_eq!(NA::finite(1.5), NA::Value(1.5));
        assert!(NA::finite(f64::NAN).is_na());
        assert!(NA::finite(f64::INFINITY).is_na());
    }

    #[test]
    fn test_serializes_as_null() {
        let json = serde_json::to_string(&vec![NA::Value(2.0), NA::NA]).unwrap();
        assert_eq!(json, "[2.0,null]");

        let back: Vec<NA<f64>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![NA::Value(2.0), NA::NA]);
    }

    #[test]
    fn test_display() {
        assert_eq!(NA::Value(3).to_string(), "3");
        assert_eq!(NA::<i32>::NA.to_string(), "NA");
    }
}
