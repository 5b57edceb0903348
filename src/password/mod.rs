//! 密码哈希策略模块
//!
//! 负责选择哈希算法、套用策略参数、生成自描述的哈希字符串、校验密码，
//! 以及判断已有哈希相对当前策略是否过期。
//!
//! ## 支持的算法
//!
//! - **bcrypt**: 标识符 `2`、`2a`、`2b`、`2x`、`2y`，参数 `cost`（需启用 `bcrypt` feature）
//! - **argon2**: 标识符 `argon2id`、`argon2i`、`argon2d`，参数 `m`、`t`、`p`（需启用 `argon2` feature）
//! - **scrypt**: 标识符 `scrypt`，参数 `ln`、`r`、`p`（需启用 `scrypt` feature）
//!
//! 自定义算法实现 [`HashAlgorithm`] 后注册到 [`Registry`] 即可使用。
//!
//! ## 组成
//!
//! - [`Registry`] - 算法名称、标识符到描述符的映射
//! - [`codec`] - 解析 `$<标识符>$...` 形式的哈希字符串
//! - [`PolicyConfig`] - 默认算法与各算法的默认参数
//! - [`PasswordHasher`] - 哈希、校验、信息查询、重新哈希判断
//! - [`task`] - Future 与回调两种异步调用形式
//!
//! ## 示例
//!
//! ### 使用默认引擎
//!
//! ```rust
//! use credrs::password::{get_info, hash_password, needs_rehash, verify_password};
//!
//! let hash = hash_password("my_secure_password").unwrap();
//! assert!(verify_password("my_secure_password", &hash).unwrap());
//! assert!(!needs_rehash(&hash).unwrap());
//!
//! let info = get_info(&hash).unwrap();
//! println!("{} {:?} {:?}", info.algorithm, info.tag, info.options);
//! ```
//!
//! ### 调整策略并检查旧哈希
//!
#![cfg_attr(feature = "bcrypt", doc = "```rust")]
#![cfg_attr(not(feature = "bcrypt"), doc = "```rust,ignore")]
//! use credrs::password::{Params, PasswordHasher, PolicyConfig};
//!
//! let hasher = PasswordHasher::with_policy(PolicyConfig::default().with_param("bcrypt", "cost", 4));
//! let hash = hasher.hash("my_password").unwrap();
//! assert_eq!(hasher.get_info(&hash).unwrap().options.get("cost"), Some(4));
//!
//! // 提高 cost 后旧哈希需要重新生成
//! hasher.configure(|policy| policy.set_param("bcrypt", "cost", 5));
//! assert!(hasher.needs_rehash(&hash).unwrap());
//! ```
//!
//! ### 未识别的哈希
//!
//! ```rust
//! use credrs::password::get_info;
//!
//! let info = get_info("$unknown$abc").unwrap();
//! assert_eq!(info.algorithm, "unknown");
//! assert!(info.options.is_empty());
//!
//! assert!(get_info("not-a-hash").unwrap_err().is_invalid_format());
//! ```

pub mod algorithm;
pub mod codec;
mod hasher;
mod params;
mod policy;
mod registry;
pub mod task;

pub use algorithm::HashAlgorithm;
pub use codec::{HashInfo, UNKNOWN_ALGORITHM};
pub use hasher::{
    PasswordHasher, VerifyOutcome, get_info, global, hash_password, needs_rehash, verify_password,
};
pub use params::Params;
pub use policy::PolicyConfig;
pub use registry::Registry;

// 编译时检查：至少需要启用一个密码哈希算法
#[cfg(not(any(feature = "argon2", feature = "bcrypt", feature = "scrypt")))]
compile_error!(
    "At least one password hashing algorithm (bcrypt, argon2, or scrypt) must be enabled. Enable one of the password hashing features."
);
