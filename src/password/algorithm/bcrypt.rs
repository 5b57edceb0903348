//! bcrypt 描述符
//!
//! 哈希格式：`$<tag>$<cost>$<22 位 salt><31 位 digest>`，`tag` 为历史上不同
//! 实现使用的版本标记。新哈希总是以规范的 `2y` 标记输出。
//!
//! 哈希与校验都不截断密码：超出 bcrypt 长度上限（72 字节）的密码返回
//! `PrimitiveFailure`，共享前缀的长密码不会互相匹配。
//!
//! 最早的 `2` 标识符只用于识别：`get_info` 与 `needs_rehash` 可以解析这类
//! 哈希，但底层原语不支持校验，`verify` 返回 `PrimitiveFailure`。

use ::bcrypt::Version;

use super::{HashAlgorithm, below_floor};
use crate::error::{Error, Result};
use crate::password::codec::HashInfo;
use crate::password::params::Params;

const IDENTIFIERS: &[&str] = &["2", "2a", "2b", "2x", "2y"];

/// bcrypt 算法
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptAlgorithm;

impl BcryptAlgorithm {
    /// 算法名称
    pub const NAME: &'static str = "bcrypt";

    /// 规范（最新）的 bcrypt 标识符
    pub const LATEST_TAG: &'static str = "2y";

    /// 策略未配置 cost 时使用的值
    pub const DEFAULT_COST: u32 = 10;
}

impl HashAlgorithm for BcryptAlgorithm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn identifiers(&self) -> &[&str] {
        IDENTIFIERS
    }

    fn hash(&self, password: &str, params: &Params) -> Result<String> {
        let cost = params.get_or("cost", Self::DEFAULT_COST);
        ::bcrypt::non_truncating_hash_with_result(password, cost)
            .map(|parts| parts.format_for_version(Version::TwoY))
            .map_err(|e| Error::primitive(format!("bcrypt hash failed: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        ::bcrypt::non_truncating_verify(password, hash)
            .map_err(|e| Error::primitive(format!("bcrypt verify failed: {}", e)))
    }

    fn extract_params(&self, hash: &str) -> Result<Params> {
        // `$<tag>$<cost>$...`：跳过开头的分隔符和标识符
        let mut fields = hash.splitn(4, '$').skip(2);
        let cost = fields
            .next()
            .ok_or_else(|| Error::invalid_format("bcrypt hash is missing its cost field"))?;
        if fields.next().is_none() {
            return Err(Error::invalid_format("bcrypt cost field is not terminated"));
        }
        if cost.is_empty() || !cost.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_format(format!(
                "bcrypt cost field is not numeric: {:?}",
                cost
            )));
        }
        let cost = cost
            .parse::<u32>()
            .map_err(|e| Error::invalid_format(format!("bcrypt cost out of range: {}", e)))?;

        Ok(Params::new().with("cost", cost))
    }

    fn is_stale(&self, info: &HashInfo, policy: &Params, options: &Params) -> bool {
        info.tag.as_deref() != Some(Self::LATEST_TAG)
            || below_floor(&info.options, &["cost"], policy, options)
    }
}
