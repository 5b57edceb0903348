//! 算法注册表
//!
//! 按名称和标识符索引 [`HashAlgorithm`] 描述符。注册表只追加不删除：
//! 在进程启动时构建完成，之后通过 `Arc` 共享，只读使用。
//!
//! ## 示例
//!
//! ```rust
//! use credrs::password::Registry;
//!
//! let registry = Registry::with_defaults();
//! # #[cfg(feature = "bcrypt")]
//! assert_eq!(registry.resolve_by_tag("2y").unwrap().name(), "bcrypt");
//! assert!(registry.resolve_by_tag("md5").is_none());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::algorithm::HashAlgorithm;
use crate::error::{Error, RegistryError, Result};

/// 算法注册表
#[derive(Debug, Clone, Default)]
pub struct Registry {
    by_name: HashMap<String, Arc<dyn HashAlgorithm>>,
    by_tag: HashMap<String, Arc<dyn HashAlgorithm>>,
}

impl Registry {
    /// 创建空注册表
    pub fn empty() -> Self {
        Self::default()
    }

    /// 创建注册了所有已启用算法的注册表
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        #[cfg(feature = "bcrypt")]
        registry.insert(Arc::new(super::algorithm::BcryptAlgorithm));
        #[cfg(feature = "argon2")]
        registry.insert(Arc::new(super::algorithm::Argon2Algorithm));
        #[cfg(feature = "scrypt")]
        registry.insert(Arc::new(super::algorithm::ScryptAlgorithm));
        registry
    }

    /// 注册算法
    ///
    /// 名称或任一标识符已被占用时拒绝注册，注册表保持不变。
    ///
    /// # Errors
    ///
    /// - `RegistryError::DuplicateName` - 同名算法已注册
    /// - `RegistryError::DuplicateTag` - 标识符已属于其他算法
    /// - `RegistryError::NoIdentifiers` - 算法没有声明标识符
    pub fn register<A: HashAlgorithm + 'static>(&mut self, algorithm: A) -> Result<()> {
        self.register_arc(Arc::new(algorithm))
    }

    /// 注册已共享的算法实例
    pub fn register_arc(&mut self, algorithm: Arc<dyn HashAlgorithm>) -> Result<()> {
        let name = algorithm.name();
        if self.by_name.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()).into());
        }
        if algorithm.identifiers().is_empty() {
            return Err(RegistryError::NoIdentifiers(name.to_string()).into());
        }
        if let Some((tag, owner)) = algorithm
            .identifiers()
            .iter()
            .find_map(|tag| self.by_tag.get(*tag).map(|owner| (*tag, owner)))
        {
            return Err(Error::Registry(RegistryError::DuplicateTag {
                tag: tag.to_string(),
                owner: owner.name().to_string(),
            }));
        }

        self.insert(algorithm);
        Ok(())
    }

    /// 链式注册，适用于构建阶段
    pub fn with<A: HashAlgorithm + 'static>(mut self, algorithm: A) -> Result<Self> {
        self.register(algorithm)?;
        Ok(self)
    }

    fn insert(&mut self, algorithm: Arc<dyn HashAlgorithm>) {
        tracing::trace!(
            algorithm = algorithm.name(),
            identifiers = ?algorithm.identifiers(),
            "registering hash algorithm"
        );
        for tag in algorithm.identifiers() {
            self.by_tag
                .insert((*tag).to_string(), Arc::clone(&algorithm));
        }
        self.by_name.insert(algorithm.name().to_string(), algorithm);
    }

    /// 根据标识符查找算法，未找到返回 `None`
    pub fn resolve_by_tag(&self, tag: &str) -> Option<Arc<dyn HashAlgorithm>> {
        self.by_tag.get(tag).cloned()
    }

    /// 根据名称查找算法
    ///
    /// # Errors
    ///
    /// 未注册时返回 `UnsupportedAlgorithm`。
    pub fn resolve_by_name(&self, name: &str) -> Result<Arc<dyn HashAlgorithm>> {
        self.by_name
            .get(name)
            .cloned()
            .ok_or_else(|| Error::unsupported_algorithm(name))
    }

    /// 是否注册了某个算法
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// 已注册的算法名称（按字母排序）
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::params::Params;

    /// 仅用于测试的明文“算法”：`$plain$<password>`
    struct Plain {
        name: &'static str,
        identifiers: &'static [&'static str],
    }

    impl HashAlgorithm for Plain {
        fn name(&self) -> &str {
            self.name
        }

        fn identifiers(&self) -> &[&str] {
            self.identifiers
        }

        fn hash(&self, password: &str, _params: &Params) -> Result<String> {
            Ok(format!("${}${}", self.identifiers[0], password))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool> {
            Ok(hash.ends_with(&format!("${}", password)))
        }

        fn extract_params(&self, _hash: &str) -> Result<Params> {
            Ok(Params::new())
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = Registry::empty();
        registry
            .register(Plain {
                name: "plain",
                identifiers: &["plain", "p"],
            })
            .unwrap();

        assert_eq!(registry.resolve_by_tag("p").unwrap().name(), "plain");
        assert_eq!(registry.resolve_by_tag("plain").unwrap().name(), "plain");
        assert_eq!(registry.resolve_by_name("plain").unwrap().name(), "plain");
        assert!(registry.contains("plain"));
    }

    #[test]
    fn test_resolve_missing() {
        let registry = Registry::empty();
        assert!(registry.resolve_by_tag("2y").is_none());
        assert!(
            registry
                .resolve_by_name("bcrypt")
                .unwrap_err()
                .is_unsupported_algorithm()
        );
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut registry = Registry::empty();
        registry
            .register(Plain {
                name: "first",
                identifiers: &["x"],
            })
            .unwrap();

        let err = registry
            .register(Plain {
                name: "second",
                identifiers: &["y", "x"],
            })
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Registry(RegistryError::DuplicateTag { ref tag, ref owner })
                if tag == "x" && owner == "first"
        ));
        // 失败的注册不会留下部分标识符
        assert!(registry.resolve_by_tag("y").is_none());
        assert!(!registry.contains("second"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = Registry::empty();
        registry
            .register(Plain {
                name: "plain",
                identifiers: &["a"],
            })
            .unwrap();
        let err = registry
            .register(Plain {
                name: "plain",
                identifiers: &["b"],
            })
            .unwrap_err();
        assert!(matches!(err, Error::Registry(RegistryError::DuplicateName(_))));
    }

    #[test]
    fn test_no_identifiers_rejected() {
        let err = Registry::empty()
            .with(Plain {
                name: "silent",
                identifiers: &[],
            })
            .unwrap_err();
        assert!(matches!(err, Error::Registry(RegistryError::NoIdentifiers(_))));
    }

    #[test]
    #[cfg(all(feature = "bcrypt", feature = "argon2"))]
    fn test_defaults() {
        let registry = Registry::with_defaults();
        for tag in ["2", "2a", "2b", "2x", "2y"] {
            assert_eq!(registry.resolve_by_tag(tag).unwrap().name(), "bcrypt");
        }
        for tag in ["argon2id", "argon2i", "argon2d"] {
            assert_eq!(registry.resolve_by_tag(tag).unwrap().name(), "argon2");
        }
        assert!(registry.names().contains(&"bcrypt"));
    }
}
