//! # credrs
//!
//! 密码哈希策略层：选择哈希算法、套用可配置的成本参数、生成自描述的
//! 哈希字符串、校验密码，并判断已有哈希相对当前策略是否需要重新生成。
//!
//! 具体的密码学原语（bcrypt、Argon2、scrypt）由对应的 crate 提供，本库只负责
//! 策略与哈希元数据：
//!
//! - **算法注册表**: 按名称和标识符查找算法，新增算法无需修改引擎
//! - **哈希解码**: 从 `$2y$12$...` 这类字符串中取出算法、标识符和参数
//! - **策略配置**: 默认算法和各算法的默认参数，可从 JSON 加载
//! - **重新哈希判断**: 算法不同、标识符过旧或参数低于策略下限时需要重新哈希
//! - **异步执行**: 慢速原语在阻塞线程池执行，支持 Future 与回调两种形式
//!
//! ## Features
//!
//! - `bcrypt` - 启用 bcrypt 支持（默认启用）
//! - `argon2` - 启用 Argon2 支持（默认启用）
//! - `scrypt` - 启用 scrypt 支持
//! - `full` - 启用所有算法
//!
//! ## 示例
//!
//! ```rust
//! use credrs::{hash_password, needs_rehash, verify_password};
//!
//! // 哈希密码
//! let hash = hash_password("my_secure_password").unwrap();
//!
//! // 验证密码
//! let is_valid = verify_password("my_secure_password", &hash).unwrap();
//! assert!(is_valid);
//!
//! // 登录成功后检查是否需要按新策略重新哈希
//! assert!(!needs_rehash(&hash).unwrap());
//! ```
//!
//! ## 异步使用
//!
//! ```rust
//! use credrs::{Params, PasswordHasher, PolicyConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let hasher = PasswordHasher::with_policy(PolicyConfig::default().with_param("bcrypt", "cost", 4));
//! let hash = hasher.hash_async("secret", None, Params::new()).await.unwrap();
//! assert!(hasher.verify_async("secret", &hash).await.unwrap());
//! # }
//! ```
//!
//! ## 日志
//!
//! 本库通过 `tracing` 输出 `debug`/`trace` 级别的事件（算法选择、注册、
//! 重新哈希判断），不会记录密码或哈希字符串。订阅器由调用方安装。

pub mod error;
pub mod password;

pub use error::{Error, Result};

// ============================================================================
// 密码相关导出
// ============================================================================

pub use password::{
    HashAlgorithm, HashInfo, Params, PasswordHasher, PolicyConfig, Registry, VerifyOutcome,
    get_info, hash_password, needs_rehash, verify_password,
};
