//! 算法参数
//!
//! 哈希参数是一组 `名称 -> 数值` 的映射，例如 bcrypt 的 `{cost: 12}` 或
//! argon2 的 `{m: 19456, t: 2, p: 1}`。策略默认值、调用方选项以及从哈希
//! 字符串中解析出的参数都使用同一个类型表示。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 算法参数映射
///
/// 使用 `BTreeMap` 保证遍历和序列化顺序稳定。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, u32>);

impl Params {
    /// 创建空参数
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式添加一个参数
    ///
    /// ```rust
    /// use credrs::password::Params;
    ///
    /// let params = Params::new().with("cost", 12);
    /// assert_eq!(params.get("cost"), Some(12));
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: u32) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// 设置参数，返回旧值
    pub fn set(&mut self, key: impl Into<String>, value: u32) -> Option<u32> {
        self.0.insert(key.into(), value)
    }

    /// 读取参数
    pub fn get(&self, key: &str) -> Option<u32> {
        self.0.get(key).copied()
    }

    /// 读取参数，缺失时返回 `default`
    pub fn get_or(&self, key: &str, default: u32) -> u32 {
        self.get(key).unwrap_or(default)
    }

    /// 是否包含某个参数
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// 参数个数
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 遍历所有参数
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// 以 `self` 为调用方选项、`policy` 为策略默认值合并
    ///
    /// 两边都存在的键以策略默认值为准：调用方只能补充策略没有设置的参数，
    /// 不能削弱策略。
    ///
    /// ```rust
    /// use credrs::password::Params;
    ///
    /// let policy = Params::new().with("cost", 12);
    /// let options = Params::new().with("cost", 8).with("extra", 1);
    ///
    /// let merged = options.merged_under(&policy);
    /// assert_eq!(merged.get("cost"), Some(12));
    /// assert_eq!(merged.get("extra"), Some(1));
    /// ```
    pub fn merged_under(&self, policy: &Params) -> Params {
        let mut merged = self.clone();
        for (key, value) in policy.iter() {
            merged.set(key, value);
        }
        merged
    }

    /// 计算某个参数的下限：调用方选项与策略默认值中的较大者
    ///
    /// 两边都没有设置时返回 `None`。
    pub fn floor(key: &str, options: &Params, policy: &Params) -> Option<u32> {
        match (options.get(key), policy.get(key)) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_wins_on_conflict() {
        let policy = Params::new().with("cost", 12);
        let options = Params::new().with("cost", 4);
        assert_eq!(options.merged_under(&policy).get("cost"), Some(12));
    }

    #[test]
    fn test_options_fill_gaps() {
        let policy = Params::new();
        let options = Params::new().with("cost", 6);
        assert_eq!(options.merged_under(&policy).get("cost"), Some(6));
    }

    #[test]
    fn test_floor() {
        let empty = Params::new();
        let low = Params::new().with("cost", 8);
        let high = Params::new().with("cost", 12);

        assert_eq!(Params::floor("cost", &low, &high), Some(12));
        assert_eq!(Params::floor("cost", &high, &low), Some(12));
        assert_eq!(Params::floor("cost", &low, &empty), Some(8));
        assert_eq!(Params::floor("cost", &empty, &empty), None);
    }

    #[test]
    fn test_serde_transparent() {
        let params: Params = [("m", 64), ("t", 1)].into_iter().collect();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"m":64,"t":1}"#);

        let back: Params = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
