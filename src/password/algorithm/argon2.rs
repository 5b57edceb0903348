//! Argon2 描述符
//!
//! 使用 PHC 字符串格式：`$argon2id$v=19$m=19456,t=2,p=1$<salt>$<digest>`。
//! 新哈希总是使用 Argon2id、版本 0x13。

use ::argon2::{Algorithm, Argon2, Params as Argon2Params, Version};
use password_hash::{PasswordHasher as _, PasswordVerifier as _};

use super::{HashAlgorithm, below_floor, phc};
use crate::error::{Error, Result};
use crate::password::codec::HashInfo;
use crate::password::params::Params;

/// 规范（最新）的 argon2 标识符
pub const LATEST_TAG: &str = "argon2id";

/// 当前的 Argon2 版本号（0x13）
pub const LATEST_VERSION: u32 = 19;

/// 参与新鲜度比较的参数：内存（KiB）、迭代次数、并行度
pub const COST_KEYS: &[&str] = &["m", "t", "p"];

const IDENTIFIERS: &[&str] = &["argon2id", "argon2i", "argon2d"];

/// Argon2 算法
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Algorithm;

impl Argon2Algorithm {
    /// 算法名称
    pub const NAME: &'static str = "argon2";

    fn build(params: &Params) -> Result<Argon2<'static>> {
        let argon2_params = Argon2Params::new(
            params.get_or("m", Argon2Params::DEFAULT_M_COST),
            params.get_or("t", Argon2Params::DEFAULT_T_COST),
            params.get_or("p", Argon2Params::DEFAULT_P_COST),
            None,
        )
        .map_err(|e| Error::primitive(format!("invalid argon2 parameters: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params))
    }
}

impl HashAlgorithm for Argon2Algorithm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn identifiers(&self) -> &[&str] {
        IDENTIFIERS
    }

    fn hash(&self, password: &str, params: &Params) -> Result<String> {
        let argon2 = Self::build(params)?;
        let salt = phc::generate_salt()?;

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| Error::primitive(format!("argon2 hash failed: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = phc::parse(hash)?;
        // 校验时的算法变体和参数取自哈希本身
        let result = Argon2::default().verify_password(password.as_bytes(), &parsed);
        phc::verify_outcome(result, Self::NAME)
    }

    fn extract_params(&self, hash: &str) -> Result<Params> {
        phc::extract_params(hash, COST_KEYS)
    }

    fn is_stale(&self, info: &HashInfo, policy: &Params, options: &Params) -> bool {
        info.tag.as_deref() != Some(LATEST_TAG)
            || info.options.get("v").is_none_or(|v| v < LATEST_VERSION)
            || below_floor(&info.options, COST_KEYS, policy, options)
    }
}
