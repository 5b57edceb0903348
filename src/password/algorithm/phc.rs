//! PHC 字符串格式辅助函数（argon2 与 scrypt 共用）

use password_hash::{PasswordHash, SaltString};

use crate::error::{Error, Result};
use crate::password::params::Params;

/// 解析 PHC 字符串中的数值参数
///
/// 只提取 `keys` 列出的参数，`keyid`、`data` 等其他参数忽略。
/// `version` 字段（如 argon2 的 `v=19`）以 `v` 为键一并返回。
pub(crate) fn extract_params(hash: &str, keys: &[&str]) -> Result<Params> {
    let parsed = parse(hash)?;

    let mut params = Params::new();
    if let Some(version) = parsed.version {
        params.set("v", version);
    }
    for (ident, value) in parsed.params.iter() {
        if !keys.contains(&ident.as_str()) {
            continue;
        }
        let value = value.decimal().map_err(|e| {
            Error::invalid_format(format!("parameter '{}' is not numeric: {}", ident, e))
        })?;
        params.set(ident.as_str(), value);
    }
    Ok(params)
}

/// 解析 PHC 字符串，供原语校验使用
pub(crate) fn parse(hash: &str) -> Result<PasswordHash<'_>> {
    PasswordHash::new(hash).map_err(|e| Error::invalid_format(format!("invalid PHC string: {}", e)))
}

/// 生成 16 字节随机盐
pub(crate) fn generate_salt() -> Result<SaltString> {
    let mut salt_bytes = [0u8; 16];
    getrandom::fill(&mut salt_bytes)
        .map_err(|e| Error::primitive(format!("failed to generate random salt: {}", e)))?;
    SaltString::encode_b64(&salt_bytes)
        .map_err(|e| Error::primitive(format!("failed to encode salt: {}", e)))
}

/// 将原语的校验结果映射为 `Ok(bool)`
///
/// 密码不匹配是正常结果，其余错误交给调用方。
pub(crate) fn verify_outcome(result: password_hash::Result<()>, algorithm: &str) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::primitive(format!("{} verify failed: {}", algorithm, e))),
    }
}
