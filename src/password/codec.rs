//! 自描述哈希字符串解码
//!
//! 哈希字符串以 `$<标识符>$` 开头，例如 `$2y$12$...` 或 `$argon2id$v=19$...`。
//! 解码只做解析，从不执行密码学运算：
//!
//! 1. 按固定语法 `$ 标识符 $` 截取标识符，不匹配时返回 `InvalidFormat`
//! 2. 在注册表中查找标识符，找不到时得到 `unknown` 算法（不报错）
//! 3. 找到时由描述符提取内嵌参数，参数损坏时返回 `InvalidFormat`

use serde::Serialize;

use super::params::Params;
use super::registry::Registry;
use crate::error::{Error, Result};

/// 未识别算法的名称
pub const UNKNOWN_ALGORITHM: &str = "unknown";

const DELIMITER: char = '$';

/// 哈希字符串的解码视图
///
/// 每次解码都重新构造，不做缓存。算法未知时 `tag` 为 `None`，`options` 为空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashInfo {
    /// 算法名称，未识别时为 [`UNKNOWN_ALGORITHM`]
    pub algorithm: String,
    /// 算法内的版本标识符，例如 bcrypt 的 `"2y"`
    pub tag: Option<String>,
    /// 哈希中内嵌的参数
    pub options: Params,
}

impl HashInfo {
    /// 已识别算法的解码结果
    pub fn known(algorithm: impl Into<String>, tag: impl Into<String>, options: Params) -> Self {
        Self {
            algorithm: algorithm.into(),
            tag: Some(tag.into()),
            options,
        }
    }

    /// 未识别算法的解码结果
    pub fn unknown() -> Self {
        Self {
            algorithm: UNKNOWN_ALGORITHM.to_string(),
            tag: None,
            options: Params::new(),
        }
    }

    /// 算法是否未识别
    pub fn is_unknown(&self) -> bool {
        self.tag.is_none()
    }
}

/// 截取哈希字符串开头的标识符
///
/// 语法：`$`，一个或多个非 `$` 字符，`$`。
pub fn identifier(hash: &str) -> Result<&str> {
    let rest = hash
        .strip_prefix(DELIMITER)
        .ok_or_else(|| Error::invalid_format("hash must start with '$'"))?;
    match rest.split_once(DELIMITER) {
        Some((tag, _)) if !tag.is_empty() => Ok(tag),
        Some(_) => Err(Error::invalid_format("hash identifier is empty")),
        None => Err(Error::invalid_format("hash identifier is not terminated")),
    }
}

/// 解码哈希字符串
///
/// ```rust
/// use credrs::password::{Registry, codec};
///
/// let registry = Registry::with_defaults();
///
/// let info = codec::decode(&registry, "$unknown$whatever").unwrap();
/// assert_eq!(info.algorithm, "unknown");
/// assert!(info.options.is_empty());
///
/// assert!(codec::decode(&registry, "not-a-hash").is_err());
/// ```
pub fn decode(registry: &Registry, hash: &str) -> Result<HashInfo> {
    let tag = identifier(hash)?;

    let Some(algorithm) = registry.resolve_by_tag(tag) else {
        tracing::debug!(tag, "unrecognized hash identifier");
        return Ok(HashInfo::unknown());
    };

    let options = algorithm.extract_params(hash)?;
    Ok(HashInfo::known(algorithm.name(), tag, options))
}
