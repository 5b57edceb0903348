//! 集成测试：哈希、校验与哈希信息
//!
//! 覆盖往返校验、错误密码、格式往返、未识别标识符以及策略优先级。

use credrs::password::{Params, PasswordHasher, PolicyConfig};

fn fast_policy() -> PolicyConfig {
    PolicyConfig::default()
        .with_param("bcrypt", "cost", 4)
        .with_defaults(
            "argon2",
            Params::new().with("m", 64).with("t", 1).with("p", 1),
        )
        .with_defaults(
            "scrypt",
            Params::new().with("ln", 4).with("r", 8).with("p", 1),
        )
}

/// 测试每个已注册算法的往返校验
#[test]
fn test_round_trip_every_algorithm() {
    let hasher = PasswordHasher::with_policy(fast_policy());
    let passwords = ["", "a", "correct horse battery staple", "密码测试🔐émoji"];

    for algorithm in hasher.registry().names() {
        for password in passwords {
            let hash = hasher
                .hash_with(password, Some(algorithm), &Params::new())
                .unwrap();
            assert!(
                hasher.verify(password, &hash).unwrap(),
                "{} failed to verify its own hash",
                algorithm
            );
        }
    }
}

/// 测试不同密码互不匹配
#[test]
fn test_negative_verify() {
    let hasher = PasswordHasher::with_policy(fast_policy());
    let pairs = [("alpha", "beta"), ("password", "Password"), ("x", "x ")];

    for algorithm in hasher.registry().names() {
        for (p1, p2) in pairs {
            let hash = hasher
                .hash_with(p1, Some(algorithm), &Params::new())
                .unwrap();
            assert!(!hasher.verify(p2, &hash).unwrap());
        }
    }
}

/// 测试哈希中的 cost 可以无损读回
#[test]
#[cfg(feature = "bcrypt")]
fn test_format_round_trip() {
    let hasher = PasswordHasher::with_policy(PolicyConfig::bare("bcrypt"));

    for cost in [4, 5, 6] {
        let options = Params::new().with("cost", cost);
        let hash = hasher
            .hash_with("password", Some("bcrypt"), &options)
            .unwrap();
        let info = hasher.get_info(&hash).unwrap();

        assert_eq!(info.algorithm, "bcrypt");
        assert_eq!(info.tag.as_deref(), Some("2y"));
        assert_eq!(info.options.get("cost"), Some(cost));
        // $2y$NN$ + 22 位 salt + 31 位 digest
        assert_eq!(hash.len(), 60);
        assert_eq!(&hash[4..6], format!("{:02}", cost));
    }
}

/// 测试 argon2 参数可以无损读回
#[test]
#[cfg(feature = "argon2")]
fn test_argon2_info() {
    let hasher = PasswordHasher::with_policy(fast_policy());
    let hash = hasher
        .hash_with("password", Some("argon2"), &Params::new())
        .unwrap();
    let info = hasher.get_info(&hash).unwrap();

    assert_eq!(info.algorithm, "argon2");
    assert_eq!(info.tag.as_deref(), Some("argon2id"));
    assert_eq!(info.options.get("m"), Some(64));
    assert_eq!(info.options.get("t"), Some(1));
    assert_eq!(info.options.get("p"), Some(1));
    assert_eq!(info.options.get("v"), Some(19));
}

/// 测试全局 cost 为 12 时，调用方传入的 cost 8 会被策略覆盖
#[test]
#[cfg(feature = "bcrypt")]
fn test_policy_precedence_over_call_options() {
    let hasher =
        PasswordHasher::with_policy(PolicyConfig::default().with_param("bcrypt", "cost", 12));

    let hash = hasher
        .hash_with("password", Some("bcrypt"), &Params::new().with("cost", 8))
        .unwrap();

    let info = hasher.get_info(&hash).unwrap();
    assert_eq!(info.options.get("cost"), Some(12));
    assert!(hasher.verify("password", &hash).unwrap());
}

/// 测试未识别的标识符作为数据返回
#[test]
fn test_unknown_tag_tolerance() {
    let hasher = PasswordHasher::with_policy(fast_policy());

    let info = hasher.get_info("$unknown$...").unwrap();
    assert_eq!(info.algorithm, "unknown");
    assert!(info.tag.is_none());
    assert!(info.options.is_empty());

    // 重新哈希判断走算法不匹配分支
    assert!(hasher.needs_rehash("$unknown$...").unwrap());

    // 校验则必须报错
    assert!(
        hasher
            .verify("password", "$unknown$...")
            .unwrap_err()
            .is_unsupported_algorithm()
    );
}

/// 测试结构无效的输入被拒绝
#[test]
fn test_invalid_format_rejection() {
    let hasher = PasswordHasher::with_policy(fast_policy());

    for input in ["not-a-hash", "", "$", "$$", "2y$10$abc", "$2y"] {
        let err = hasher.get_info(input).unwrap_err();
        assert!(err.is_invalid_format(), "{:?}", input);
        assert!(
            hasher.needs_rehash(input).unwrap_err().is_invalid_format(),
            "{:?}",
            input
        );
        assert!(
            hasher.verify("pw", input).unwrap_err().is_invalid_format(),
            "{:?}",
            input
        );
    }
}

/// 测试内嵌参数损坏时报错而不是默认为零
#[test]
#[cfg(feature = "bcrypt")]
fn test_malformed_cost_is_an_error() {
    let hasher = PasswordHasher::with_policy(fast_policy());

    let malformed = "$2y$zz$abcdefghijklmnopqrstuv";
    let err = hasher.get_info(malformed).unwrap_err();
    assert!(err.is_invalid_format());

    let err = hasher.verify("pw", malformed).unwrap_err();
    assert!(err.is_invalid_format());
}

/// 测试 bcrypt 原语的错误原样上报
#[test]
#[cfg(feature = "bcrypt")]
fn test_primitive_failure_propagates() {
    let hasher = PasswordHasher::with_policy(fast_policy());

    // 结构合法但 salt/digest 长度错误
    let err = hasher.verify("pw", "$2y$04$tooshort").unwrap_err();
    assert!(err.is_primitive_failure());

    // 策略中的无效 cost 直到哈希时才被原语拒绝
    hasher.configure(|policy| policy.set_param("bcrypt", "cost", 3));
    let err = hasher
        .hash_with("pw", Some("bcrypt"), &Params::new())
        .unwrap_err();
    assert!(err.is_primitive_failure());
}

/// 测试所有历史 bcrypt 标识符都能识别
#[test]
#[cfg(feature = "bcrypt")]
fn test_legacy_bcrypt_tags_decode() {
    let hasher = PasswordHasher::with_policy(fast_policy());
    let body = "R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

    for tag in ["2", "2a", "2b", "2x", "2y"] {
        let info = hasher.get_info(&format!("${}$10${}", tag, body)).unwrap();
        assert_eq!(info.algorithm, "bcrypt");
        assert_eq!(info.tag.as_deref(), Some(tag));
        assert_eq!(info.options.get("cost"), Some(10));
    }
}

/// 测试 bcrypt 可以校验其他实现生成的 2a/2b 哈希
#[test]
#[cfg(feature = "bcrypt")]
fn test_verify_legacy_bcrypt_variants() {
    let hasher = PasswordHasher::with_policy(fast_policy());
    let hash = hasher.hash("legacy").unwrap();
    assert!(hash.starts_with("$2y$"));

    for tag in ["2a", "2b"] {
        let legacy = hash.replacen("2y", tag, 1);
        assert!(hasher.verify("legacy", &legacy).unwrap());
        assert!(hasher.needs_rehash(&legacy).unwrap());
    }
}

/// 测试超长密码不会被静默截断
#[test]
#[cfg(feature = "bcrypt")]
fn test_bcrypt_long_password_not_truncated() {
    let hasher = PasswordHasher::with_policy(fast_policy());

    let err = hasher
        .hash_with(&"x".repeat(73), Some("bcrypt"), &Params::new())
        .unwrap_err();
    assert!(err.is_primitive_failure());

    // 共享前 71 字节的长密码不能通过校验
    let hash = hasher
        .hash_with(&"x".repeat(71), Some("bcrypt"), &Params::new())
        .unwrap();
    assert!(hasher.verify(&"x".repeat(71), &hash).unwrap());
    assert!(!matches!(hasher.verify(&"x".repeat(72), &hash), Ok(true)));
    assert!(!matches!(hasher.verify(&"x".repeat(100), &hash), Ok(true)));
}

/// 测试最早的 `2` 标识符只能解析，不能校验
#[test]
#[cfg(feature = "bcrypt")]
fn test_bcrypt_tag_2_is_decode_only() {
    let hasher = PasswordHasher::with_policy(fast_policy());
    let hash = "$2$10$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

    let info = hasher.get_info(hash).unwrap();
    assert_eq!(info.algorithm, "bcrypt");
    assert_eq!(info.tag.as_deref(), Some("2"));
    assert!(hasher.needs_rehash(hash).unwrap());

    let err = hasher.verify("password", hash).unwrap_err();
    assert!(err.is_primitive_failure());
}

/// 测试带 `keyid` 等非数值参数的 argon2 哈希可以正常解析
#[test]
#[cfg(feature = "argon2")]
fn test_argon2_non_numeric_params_are_ignored() {
    let hasher = PasswordHasher::with_policy(fast_policy());
    let hash = "$argon2id$v=19$m=64,t=1,p=1,keyid=AAECAw$c29tZXNhbHRzb21lc2FsdA$ZGlnZXN0ZGlnZXN0ZGlnZXN0ZGlnZXN0";

    let info = hasher.get_info(hash).unwrap();
    assert_eq!(info.algorithm, "argon2");
    assert_eq!(info.options.get("m"), Some(64));
    assert!(!info.options.contains("keyid"));

    assert!(
        !hasher
            .needs_rehash_with(hash, Some("argon2"), &Params::new())
            .unwrap()
    );
}
