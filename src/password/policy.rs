//! 哈希策略配置
//!
//! [`PolicyConfig`] 记录默认算法以及每个算法的默认参数。它是一个普通的
//! 可变结构体：字段直接可写，不做任何校验，无效的参数（例如 bcrypt cost 为 3）
//! 要到哈希时才会被底层原语拒绝。
//!
//! 策略应在配置阶段写入，运行时的每次哈希、校验、重新哈希判断都只读取。
//! 在并发哈希的同时修改策略不会造成内存错误，但调用之间看到哪一版策略
//! 没有任何保证，这由调用方负责。
//!
//! ## 示例
//!
//! ```rust
//! use credrs::password::{Params, PolicyConfig};
//!
//! let policy = PolicyConfig::default()
//!     .with_default_algorithm("bcrypt")
//!     .with_param("bcrypt", "cost", 12);
//!
//! assert_eq!(policy.default_algorithm(), "bcrypt");
//! assert_eq!(policy.defaults("bcrypt").get("cost"), Some(12));
//! assert_eq!(policy.defaults("md5"), Params::new());
//!
//! // 从 JSON 配置加载
//! let policy = PolicyConfig::from_json(
//!     r#"{"default_algorithm":"argon2","defaults":{"argon2":{"m":65536,"t":3,"p":4}}}"#,
//! )
//! .unwrap();
//! assert_eq!(policy.defaults("argon2").get("m"), Some(65536));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::params::Params;
use crate::error::{ConfigError, Result};

/// 哈希策略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// 未指定算法时使用的算法名称
    pub default_algorithm: String,

    /// 每个算法的默认参数，键为算法名称
    pub defaults: BTreeMap<String, Params>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        #[allow(unused_mut)]
        let mut defaults = BTreeMap::new();
        #[cfg(feature = "bcrypt")]
        defaults.insert(
            "bcrypt".to_string(),
            Params::new().with("cost", super::algorithm::BcryptAlgorithm::DEFAULT_COST),
        );
        #[cfg(feature = "argon2")]
        defaults.insert(
            "argon2".to_string(),
            Params::new().with("m", 19 * 1024).with("t", 2).with("p", 1),
        );
        #[cfg(feature = "scrypt")]
        defaults.insert(
            "scrypt".to_string(),
            Params::new().with("ln", 17).with("r", 8).with("p", 1),
        );

        Self {
            default_algorithm: default_algorithm_name().to_string(),
            defaults,
        }
    }
}

fn default_algorithm_name() -> &'static str {
    #[cfg(feature = "bcrypt")]
    {
        "bcrypt"
    }
    #[cfg(all(not(feature = "bcrypt"), feature = "argon2"))]
    {
        "argon2"
    }
    #[cfg(all(not(any(feature = "bcrypt", feature = "argon2")), feature = "scrypt"))]
    {
        "scrypt"
    }
}

impl PolicyConfig {
    /// 创建默认策略
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建不含任何参数默认值的策略
    pub fn bare(default_algorithm: impl Into<String>) -> Self {
        Self {
            default_algorithm: default_algorithm.into(),
            defaults: BTreeMap::new(),
        }
    }

    /// 设置默认算法
    pub fn with_default_algorithm(mut self, name: impl Into<String>) -> Self {
        self.default_algorithm = name.into();
        self
    }

    /// 替换某个算法的全部默认参数
    pub fn with_defaults(mut self, algorithm: impl Into<String>, params: Params) -> Self {
        self.defaults.insert(algorithm.into(), params);
        self
    }

    /// 设置某个算法的单个默认参数
    pub fn with_param(mut self, algorithm: &str, key: impl Into<String>, value: u32) -> Self {
        self.set_param(algorithm, key, value);
        self
    }

    /// 原地设置某个算法的单个默认参数
    pub fn set_param(&mut self, algorithm: &str, key: impl Into<String>, value: u32) {
        self.defaults
            .entry(algorithm.to_string())
            .or_default()
            .set(key, value);
    }

    /// 默认算法名称
    pub fn default_algorithm(&self) -> &str {
        &self.default_algorithm
    }

    /// 某个算法的默认参数，未配置时为空
    pub fn defaults(&self, algorithm: &str) -> Params {
        self.defaults.get(algorithm).cloned().unwrap_or_default()
    }

    /// 从 JSON 解析策略，缺失的字段取默认值
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()).into())
    }
}
