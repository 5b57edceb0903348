//! 哈希算法描述符
//!
//! 每个算法通过实现 [`HashAlgorithm`] 接入注册表，提供：
//!
//! - 名称与哈希字符串开头的标识符（如 bcrypt 的 `2a`、`2y`）
//! - 哈希、校验两个原语调用
//! - 从哈希字符串中提取参数的纯解析函数
//! - 可选的新鲜度规则（用于判断是否需要重新哈希）
//!
//! 哈希、校验以及重新哈希判断逻辑只依赖这个 trait，新增算法只需实现它
//! 并注册，不需要修改引擎代码。

#[cfg(feature = "argon2")]
mod argon2;
#[cfg(feature = "bcrypt")]
mod bcrypt;
#[cfg(feature = "scrypt")]
mod scrypt;

#[cfg(any(feature = "argon2", feature = "scrypt"))]
mod phc;

#[cfg(feature = "argon2")]
pub use self::argon2::Argon2Algorithm;
#[cfg(feature = "bcrypt")]
pub use self::bcrypt::BcryptAlgorithm;
#[cfg(feature = "scrypt")]
pub use self::scrypt::ScryptAlgorithm;

use super::codec::HashInfo;
use super::params::Params;
use crate::error::Result;

/// 哈希算法描述符
///
/// 实现必须是无状态或内部只读的：注册后会在多个线程间共享。
///
/// 原语调用（[`hash`](Self::hash)、[`verify`](Self::verify)）可能很慢，
/// 引擎的异步接口会把它们放到阻塞线程池执行。
pub trait HashAlgorithm: Send + Sync {
    /// 算法名称，例如 `"bcrypt"`
    fn name(&self) -> &str;

    /// 该算法识别的所有标识符
    fn identifiers(&self) -> &[&str];

    /// 使用已合并的参数哈希密码
    ///
    /// 原语拒绝输入时返回 `PrimitiveFailure`。
    fn hash(&self, password: &str, params: &Params) -> Result<String>;

    /// 校验密码
    ///
    /// 密码不匹配返回 `Ok(false)`，原语层面的错误返回 `PrimitiveFailure`。
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;

    /// 从哈希字符串中提取内嵌参数
    ///
    /// 数值字段缺失或损坏时返回 `InvalidFormat`，不能默认为零。
    fn extract_params(&self, hash: &str) -> Result<Params>;

    /// 判断已解码的哈希相对当前策略是否过期
    ///
    /// 调用时算法已确认匹配。`policy` 为策略默认值，`options` 为调用方选项。
    /// 默认实现没有新鲜度规则，总是返回 `false`。
    fn is_stale(&self, info: &HashInfo, policy: &Params, options: &Params) -> bool {
        let _ = (info, policy, options);
        false
    }
}

impl std::fmt::Debug for dyn HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashAlgorithm")
            .field("name", &self.name())
            .field("identifiers", &self.identifiers())
            .finish()
    }
}

/// 检查每个参数是否都不低于要求的下限
///
/// 哈希中缺失的参数视为过期。
pub(crate) fn below_floor(
    decoded: &Params,
    keys: &[&str],
    policy: &Params,
    options: &Params,
) -> bool {
    keys.iter().any(|key| match Params::floor(key, options, policy) {
        Some(required) => decoded.get(key).is_none_or(|actual| actual < required),
        None => false,
    })
}
