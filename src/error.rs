//! 统一错误类型模块
//!
//! 提供 credrs 库中所有操作的错误类型定义。
//!
//! 密码相关的失败只分为三类（见 [`PasswordHashError`]）：
//!
//! - `InvalidFormat` - 哈希字符串不符合自描述语法，或内嵌的数值字段损坏
//! - `UnsupportedAlgorithm` - 请求的或解码得到的算法没有注册
//! - `PrimitiveFailure` - 底层密码学原语拒绝了输入或内部失败
//!
//! 同步调用、Future 以及回调三种形式都通过同一个 [`Result`] 交付错误。

use thiserror::Error;

/// credrs 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// credrs 库的错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 密码哈希错误
    #[error("Password hash error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// 算法注册表错误
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// 内部错误（例如异步任务无法调度）
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 创建一个内部错误
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// 创建一个哈希格式错误
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Error::PasswordHash(PasswordHashError::InvalidFormat(msg.into()))
    }

    /// 创建一个算法不支持错误
    pub fn unsupported_algorithm(name: impl Into<String>) -> Self {
        Error::PasswordHash(PasswordHashError::UnsupportedAlgorithm(name.into()))
    }

    /// 创建一个底层原语错误
    pub fn primitive(msg: impl Into<String>) -> Self {
        Error::PasswordHash(PasswordHashError::PrimitiveFailure(msg.into()))
    }

    /// 是否为哈希格式错误
    pub fn is_invalid_format(&self) -> bool {
        matches!(
            self,
            Error::PasswordHash(PasswordHashError::InvalidFormat(_))
        )
    }

    /// 是否为算法不支持错误
    pub fn is_unsupported_algorithm(&self) -> bool {
        matches!(
            self,
            Error::PasswordHash(PasswordHashError::UnsupportedAlgorithm(_))
        )
    }

    /// 是否为底层原语错误
    pub fn is_primitive_failure(&self) -> bool {
        matches!(
            self,
            Error::PasswordHash(PasswordHashError::PrimitiveFailure(_))
        )
    }
}

/// 密码哈希相关错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// 无效的哈希格式
    #[error("invalid hash format: {0}")]
    InvalidFormat(String),
    /// 算法不支持
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// 底层原语失败
    #[error("primitive failure: {0}")]
    PrimitiveFailure(String),
}

/// 算法注册表相关错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// 算法名称已注册
    #[error("algorithm '{0}' is already registered")]
    DuplicateName(String),
    /// 标识符已被其他算法占用
    #[error("identifier '{tag}' is already claimed by '{owner}'")]
    DuplicateTag { tag: String, owner: String },
    /// 算法没有声明任何标识符
    #[error("algorithm '{0}' declares no identifiers")]
    NoIdentifiers(String),
}

/// 配置相关错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 配置解析失败
    #[error("failed to parse policy: {0}")]
    Parse(String),
    /// 配置序列化失败
    #[error("failed to serialize policy: {0}")]
    Serialize(String),
}
