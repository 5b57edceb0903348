//! 密码哈希引擎
//!
//! [`PasswordHasher`] 把注册表、策略和解码器组合起来，提供哈希、校验、
//! 哈希信息查询以及重新哈希判断。算法分发全部通过注册表完成，
//! 引擎本身不知道任何具体算法。

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::codec::{self, HashInfo};
use super::params::Params;
use super::policy::PolicyConfig;
use super::registry::Registry;
use crate::error::{Error, Result};

/// 密码哈希引擎
///
/// 克隆是廉价的：所有克隆共享同一个注册表和同一份策略，
/// 通过任一克隆修改策略对其他克隆立即可见。
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// 只读的算法注册表
    registry: Arc<Registry>,

    /// 单写多读的策略；每次操作开始时取一次快照
    policy: Arc<RwLock<PolicyConfig>>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Registry::with_defaults(), PolicyConfig::default())
    }
}

/// [`PasswordHasher::verify_and_upgrade`] 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// 密码是否正确
    pub valid: bool,

    /// 密码正确且旧哈希已过期时，按当前策略生成的新哈希
    pub rehashed: Option<String>,
}

impl PasswordHasher {
    /// 使用给定的注册表和策略创建引擎
    ///
    /// # Example
    ///
    /// ```rust
    /// use credrs::password::{PasswordHasher, PolicyConfig, Registry};
    ///
    /// let hasher = PasswordHasher::new(
    ///     Registry::with_defaults(),
    ///     PolicyConfig::default().with_param("bcrypt", "cost", 4),
    /// );
    /// ```
    pub fn new(registry: Registry, policy: PolicyConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            policy: Arc::new(RwLock::new(policy)),
        }
    }

    /// 使用默认注册表和给定策略创建引擎
    pub fn with_policy(policy: PolicyConfig) -> Self {
        Self::new(Registry::with_defaults(), policy)
    }

    /// 算法注册表
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// 当前策略的快照
    pub fn policy(&self) -> PolicyConfig {
        self.policy
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 替换整个策略
    ///
    /// 属于配置阶段的操作，见 [`policy`](super::policy) 模块说明。
    pub fn set_policy(&self, policy: PolicyConfig) {
        *self.policy.write().unwrap_or_else(PoisonError::into_inner) = policy;
    }

    /// 原地修改策略
    ///
    /// ```rust
    /// use credrs::password::PasswordHasher;
    ///
    /// let hasher = PasswordHasher::default();
    /// hasher.configure(|policy| policy.set_param("bcrypt", "cost", 12));
    /// assert_eq!(hasher.policy().defaults("bcrypt").get("cost"), Some(12));
    /// ```
    pub fn configure<F: FnOnce(&mut PolicyConfig)>(&self, f: F) {
        f(&mut self.policy.write().unwrap_or_else(PoisonError::into_inner));
    }

    /// 使用默认算法和策略参数哈希密码
    ///
    /// # Example
    ///
    /// ```rust
    /// use credrs::password::{PasswordHasher, PolicyConfig};
    ///
    /// let hasher = PasswordHasher::with_policy(PolicyConfig::default().with_param("bcrypt", "cost", 4));
    /// let hash = hasher.hash("my_password").unwrap();
    /// # #[cfg(feature = "bcrypt")]
    /// assert!(hash.starts_with("$2y$04$"));
    /// ```
    pub fn hash(&self, password: &str) -> Result<String> {
        self.hash_with(password, None, &Params::new())
    }

    /// 哈希密码
    ///
    /// # Arguments
    ///
    /// * `password` - 明文密码，原样传给底层原语
    /// * `algorithm` - 算法名称，`None` 时使用策略的默认算法
    /// * `options` - 调用方参数；与策略默认值冲突时以策略为准
    ///
    /// # Errors
    ///
    /// - `UnsupportedAlgorithm` - 算法未注册
    /// - `PrimitiveFailure` - 底层原语拒绝（例如 cost 越界）
    pub fn hash_with(
        &self,
        password: &str,
        algorithm: Option<&str>,
        options: &Params,
    ) -> Result<String> {
        let policy = self.policy();
        let name = algorithm.unwrap_or(policy.default_algorithm());
        let descriptor = self.registry.resolve_by_name(name)?;
        let params = options.merged_under(&policy.defaults(name));

        tracing::debug!(algorithm = name, params = ?params, "hashing password");
        descriptor.hash(password, &params)
    }

    /// 校验密码
    ///
    /// 密码不做任何规范化处理，按原样比较。
    ///
    /// # Returns
    ///
    /// 密码正确返回 `Ok(true)`，错误返回 `Ok(false)`
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` - 哈希字符串无法解码
    /// - `UnsupportedAlgorithm` - 哈希使用了未注册的算法
    /// - `PrimitiveFailure` - 底层原语报错
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let info = self.get_info(hash)?;
        if info.is_unknown() {
            return Err(Error::unsupported_algorithm(codec::identifier(hash)?));
        }
        let descriptor = self.registry.resolve_by_name(&info.algorithm)?;

        tracing::debug!(algorithm = %info.algorithm, tag = ?info.tag, "verifying password");
        descriptor.verify(password, hash)
    }

    /// 解码哈希字符串
    ///
    /// 未识别的标识符作为数据返回（`algorithm == "unknown"`），不报错。
    pub fn get_info(&self, hash: &str) -> Result<HashInfo> {
        codec::decode(&self.registry, hash)
    }

    /// 按当前策略判断哈希是否需要重新生成
    pub fn needs_rehash(&self, hash: &str) -> Result<bool> {
        self.needs_rehash_with(hash, None, &Params::new())
    }

    /// 判断哈希是否需要重新生成
    ///
    /// 依次判断：
    ///
    /// 1. 解码得到的算法与目标算法（`algorithm` 或策略默认算法）不同，需要
    /// 2. 否则交给算法自身的新鲜度规则；没有规则的算法视为不需要
    ///
    /// 只有哈希字符串无法解码时才返回错误。
    pub fn needs_rehash_with(
        &self,
        hash: &str,
        algorithm: Option<&str>,
        options: &Params,
    ) -> Result<bool> {
        let info = self.get_info(hash)?;
        let policy = self.policy();
        let expected = algorithm.unwrap_or(policy.default_algorithm());

        if info.is_unknown() || info.algorithm != expected {
            tracing::debug!(
                decoded = %info.algorithm,
                expected,
                "hash uses a different algorithm"
            );
            return Ok(true);
        }

        let descriptor = self.registry.resolve_by_name(&info.algorithm)?;
        let stale = descriptor.is_stale(&info, &policy.defaults(expected), options);
        tracing::trace!(algorithm = expected, stale, "rehash decision");
        Ok(stale)
    }

    /// 校验密码，并在需要时按当前策略重新哈希
    ///
    /// 密码错误时不会生成新哈希。
    ///
    /// # Example
    ///
    /// ```rust
    /// use credrs::password::{PasswordHasher, PolicyConfig};
    ///
    /// let hasher = PasswordHasher::with_policy(PolicyConfig::default().with_param("bcrypt", "cost", 4));
    /// let old = hasher.hash("secret").unwrap();
    ///
    /// hasher.configure(|policy| policy.set_param("bcrypt", "cost", 5));
    /// let outcome = hasher.verify_and_upgrade("secret", &old).unwrap();
    /// assert!(outcome.valid);
    /// # #[cfg(feature = "bcrypt")]
    /// assert!(outcome.rehashed.is_some());
    /// ```
    pub fn verify_and_upgrade(&self, password: &str, hash: &str) -> Result<VerifyOutcome> {
        if !self.verify(password, hash)? {
            return Ok(VerifyOutcome {
                valid: false,
                rehashed: None,
            });
        }

        let rehashed = if self.needs_rehash(hash)? {
            Some(self.hash(password)?)
        } else {
            None
        };
        Ok(VerifyOutcome {
            valid: true,
            rehashed,
        })
    }
}

// ============================================================================
// 进程级默认引擎与便捷函数
// ============================================================================

static GLOBAL: LazyLock<PasswordHasher> = LazyLock::new(PasswordHasher::default);

/// 进程级默认引擎
///
/// 使用所有已启用的算法和 [`PolicyConfig::default`]。可以通过
/// [`PasswordHasher::configure`] 在启动阶段调整策略。
pub fn global() -> &'static PasswordHasher {
    &GLOBAL
}

/// 使用默认引擎哈希密码
///
/// # Example
///
/// ```rust
/// use credrs::password::{hash_password, verify_password};
///
/// let hash = hash_password("my_secure_password").unwrap();
/// assert!(verify_password("my_secure_password", &hash).unwrap());
/// assert!(!verify_password("wrong_password", &hash).unwrap());
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    global().hash(password)
}

/// 使用默认引擎校验密码
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    global().verify(password, hash)
}

/// 使用默认引擎解码哈希字符串
pub fn get_info(hash: &str) -> Result<HashInfo> {
    global().get_info(hash)
}

/// 使用默认引擎判断哈希是否需要重新生成
pub fn needs_rehash(hash: &str) -> Result<bool> {
    global().needs_rehash(hash)
}
