//! scrypt 描述符
//!
//! PHC 字符串格式：`$scrypt$ln=17,r=8,p=1$<salt>$<digest>`。
//!
//! 该描述符没有新鲜度规则：只要算法匹配，`needs_rehash` 就不会把它判为过期。

use ::scrypt::{Params as ScryptParams, Scrypt};
use password_hash::{PasswordHasher as _, PasswordVerifier as _};

use super::{HashAlgorithm, phc};
use crate::error::{Error, Result};
use crate::password::params::Params;

const IDENTIFIERS: &[&str] = &["scrypt"];

const PARAM_KEYS: &[&str] = &["ln", "r", "p"];

const OUTPUT_LEN: usize = 32;

/// scrypt 算法
#[derive(Debug, Clone, Copy, Default)]
pub struct ScryptAlgorithm;

impl ScryptAlgorithm {
    /// 算法名称
    pub const NAME: &'static str = "scrypt";
}

impl HashAlgorithm for ScryptAlgorithm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn identifiers(&self) -> &[&str] {
        IDENTIFIERS
    }

    fn hash(&self, password: &str, params: &Params) -> Result<String> {
        let log_n = u8::try_from(params.get_or("ln", u32::from(ScryptParams::RECOMMENDED_LOG_N)))
            .map_err(|_| Error::primitive("scrypt ln does not fit in a byte"))?;
        let scrypt_params = ScryptParams::new(
            log_n,
            params.get_or("r", ScryptParams::RECOMMENDED_R),
            params.get_or("p", ScryptParams::RECOMMENDED_P),
            OUTPUT_LEN,
        )
        .map_err(|e| Error::primitive(format!("invalid scrypt parameters: {}", e)))?;
        let salt = phc::generate_salt()?;

        Scrypt
            .hash_password_customized(password.as_bytes(), None, None, scrypt_params, &salt)
            .map(|h| h.to_string())
            .map_err(|e| Error::primitive(format!("scrypt hash failed: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = phc::parse(hash)?;
        let result = Scrypt.verify_password(password.as_bytes(), &parsed);
        phc::verify_outcome(result, Self::NAME)
    }

    fn extract_params(&self, hash: &str) -> Result<Params> {
        phc::extract_params(hash, PARAM_KEYS)
    }
}
