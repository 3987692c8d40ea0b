use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_lodestone_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("LODESTONE_PORT");
        env::remove_var("LODESTONE_BIND_ADDR");
        env::remove_var("LODESTONE_FAST_TIER_URL");
        env::remove_var("LODESTONE_ACCURATE_TIER_URL");
        env::remove_var("LODESTONE_FAST_TIER_MODEL");
        env::remove_var("LODESTONE_ACCURATE_TIER_MODEL");
        env::remove_var("LODESTONE_TIER_TIMEOUT_MS");
        env::remove_var("LODESTONE_CACHE_CAPACITY");
        env::remove_var("LODESTONE_FALLBACK_POLICY");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.fast_tier_url, "http://embeddings:8000");
    assert_eq!(config.accurate_tier_url, "http://embeddings-ada002:8001");
    assert_eq!(config.fast_tier_model, "intfloat/e5-large-v2");
    assert_eq!(config.accurate_tier_model, "text-embedding-ada-002");
    assert_eq!(config.tier_timeout_ms, 30_000);
    assert_eq!(config.cache_capacity, 10_000);
    assert_eq!(config.fallback_policy, FallbackPolicy::Zero);
    config.validate().expect("defaults should validate");
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_lodestone_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.cache_capacity, 10_000);
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_lodestone_env();

    with_env_vars(&[("LODESTONE_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_custom_bind_addr() {
    clear_lodestone_env();

    with_env_vars(&[("LODESTONE_BIND_ADDR", "0.0.0.0")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0))
        );
    });
}

#[test]
#[serial]
fn test_from_env_ipv6_bind_addr() {
    clear_lodestone_env();

    with_env_vars(&[("LODESTONE_BIND_ADDR", "::1")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    });
}

#[test]
#[serial]
fn test_from_env_tier_endpoints() {
    clear_lodestone_env();

    with_env_vars(
        &[
            ("LODESTONE_FAST_TIER_URL", "http://e5.cluster:9000"),
            ("LODESTONE_ACCURATE_TIER_URL", "http://ada.cluster:9001"),
            ("LODESTONE_FAST_TIER_MODEL", "intfloat/e5-base-v2"),
            ("LODESTONE_ACCURATE_TIER_MODEL", "text-embedding-3-small"),
        ],
        || {
            let config = Config::from_env().expect("should parse");

            assert_eq!(config.fast_tier_url, "http://e5.cluster:9000");
            assert_eq!(config.accurate_tier_url, "http://ada.cluster:9001");
            assert_eq!(config.fast_tier_model, "intfloat/e5-base-v2");
            assert_eq!(config.accurate_tier_model, "text-embedding-3-small");
        },
    );
}

#[test]
#[serial]
fn test_from_env_timeout_and_capacity() {
    clear_lodestone_env();

    with_env_vars(
        &[
            ("LODESTONE_TIER_TIMEOUT_MS", "5000"),
            ("LODESTONE_CACHE_CAPACITY", "50000"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.tier_timeout_ms, 5000);
            assert_eq!(config.cache_capacity, 50000);
        },
    );
}

#[test]
#[serial]
fn test_from_env_invalid_timeout_uses_default() {
    clear_lodestone_env();

    with_env_vars(&[("LODESTONE_TIER_TIMEOUT_MS", "not_a_number")], || {
        let config = Config::from_env().expect("should parse with fallback");
        assert_eq!(config.tier_timeout_ms, 30_000);
    });
}

#[test]
#[serial]
fn test_from_env_fallback_policy() {
    clear_lodestone_env();

    with_env_vars(&[("LODESTONE_FALLBACK_POLICY", "noise")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.fallback_policy, FallbackPolicy::Noise);
    });
}

#[test]
#[serial]
fn test_unknown_fallback_policy_rejected() {
    clear_lodestone_env();

    with_env_vars(&[("LODESTONE_FALLBACK_POLICY", "random")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFallbackPolicy { .. }));
        assert!(err.to_string().contains("random"));
    });
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_lodestone_env();

    with_env_vars(&[("LODESTONE_PORT", "0")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_lodestone_env();

    with_env_vars(&[("LODESTONE_PORT", "not_a_port")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
        assert!(err.to_string().contains("failed to parse port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_too_large() {
    clear_lodestone_env();

    with_env_vars(&[("LODESTONE_PORT", "99999")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_lodestone_env();

    with_env_vars(&[("LODESTONE_BIND_ADDR", "not.an.ip.address")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
        assert!(err.to_string().contains("failed to parse bind address"));
    });
}

#[test]
fn test_validate_rejects_zero_capacity() {
    let config = Config {
        cache_capacity: 0,
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidCapacity));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let config = Config {
        tier_timeout_ms: 0,
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout));
}

#[test]
fn test_validate_rejects_empty_tier_url() {
    let config = Config {
        accurate_tier_url: "  ".to_string(),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTierUrl { .. }));
    assert!(err.to_string().contains("LODESTONE_ACCURATE_TIER_URL"));
}

#[test]
fn test_tier_config_carries_overrides() {
    let config = Config {
        fast_tier_url: "http://e5.cluster:9000".to_string(),
        tier_timeout_ms: 5000,
        fallback_policy: FallbackPolicy::Noise,
        ..Default::default()
    };

    let fast = config.tier_config(TierId::Fast);
    assert_eq!(fast.tier, TierId::Fast);
    assert_eq!(fast.base_url, "http://e5.cluster:9000");
    assert_eq!(fast.timeout, Duration::from_millis(5000));
    assert_eq!(fast.fallback_policy, FallbackPolicy::Noise);
    assert!(fast.asymmetric);

    let accurate = config.tier_config(TierId::Accurate);
    assert_eq!(accurate.base_url, "http://embeddings-ada002:8001");
    assert_eq!(accurate.model, "text-embedding-ada-002");
    assert_eq!(accurate.timeout, Duration::from_millis(5000));
    assert!(!accurate.asymmetric);
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::InvalidPort {
        value: "0".to_string(),
    };
    assert!(err.to_string().contains("invalid port"));
    assert!(err.to_string().contains("0"));
    assert!(err.to_string().contains("1 and 65535"));

    let err = ConfigError::InvalidTierUrl {
        name: "LODESTONE_FAST_TIER_URL",
    };
    assert!(err.to_string().contains("LODESTONE_FAST_TIER_URL"));

    let err = ConfigError::InvalidFallbackPolicy {
        value: "static".to_string(),
    };
    assert!(err.to_string().contains("static"));
    assert!(err.to_string().contains("zero"));
}
