use super::*;

/// # Safety
/// Only one test touches the shared config vars, so parallel tests cannot race
/// on them.
unsafe fn clear_config_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("LANDING_PATH");
        std::env::remove_var("CONTEXT_IDLE_TIMEOUT_SECS");
        std::env::remove_var("CONTEXT_SWEEP_INTERVAL_SECS");
        std::env::remove_var("COOKIE_SECURE");
    }
}

// =============================================================================
// env_bool: uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on", "  TRUE "].iter().enumerate() {
        let key = format!("__FLEET_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "Off"].iter().enumerate() {
        let key = format!("__FLEET_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_or_unset_is_none() {
    let key = "__FLEET_EB_INVALID_314__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_bool("__FLEET_EB_SURELY_UNSET_42__"), None);
}

// =============================================================================
// env_secs
// =============================================================================

#[test]
fn env_secs_defaults_when_unset() {
    assert_eq!(env_secs("__FLEET_SECS_UNSET_1__", 7).unwrap(), Duration::from_secs(7));
}

#[test]
fn env_secs_rejects_zero_and_garbage() {
    let key = "__FLEET_SECS_BAD_2__";
    for bad in ["0", "ten", "-5"] {
        unsafe { std::env::set_var(key, bad) };
        assert!(matches!(env_secs(key, 7), Err(ConfigError::InvalidDuration { .. })), "{bad:?}");
    }
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// from_env
// =============================================================================

#[test]
fn from_env_defaults_overrides_and_errors() {
    unsafe { clear_config_env() };

    let cfg = Config::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.guard, GuardConfig::default());
    assert_eq!(cfg.context_idle_timeout, Duration::from_secs(DEFAULT_CONTEXT_IDLE_TIMEOUT_SECS));
    assert_eq!(cfg.context_sweep_interval, Duration::from_secs(DEFAULT_CONTEXT_SWEEP_INTERVAL_SECS));
    assert!(!cfg.cookie_secure);

    unsafe {
        std::env::set_var("PORT", "8088");
        std::env::set_var("LANDING_PATH", "/cars");
        std::env::set_var("CONTEXT_IDLE_TIMEOUT_SECS", "90");
        std::env::set_var("COOKIE_SECURE", "yes");
    }

    let cfg = Config::from_env().unwrap();
    assert_eq!(cfg.port, 8088);
    assert_eq!(cfg.guard.landing_path(), "/cars");
    assert_eq!(cfg.context_idle_timeout, Duration::from_secs(90));
    assert!(cfg.cookie_secure);

    unsafe { std::env::set_var("LANDING_PATH", "/login") };
    assert!(matches!(Config::from_env(), Err(ConfigError::Guard(GuardError::LandingIsLogin(_)))));

    unsafe {
        std::env::remove_var("LANDING_PATH");
        std::env::set_var("PORT", "not-a-port");
    }
    assert!(matches!(Config::from_env(), Err(ConfigError::InvalidPort(_))));

    unsafe { clear_config_env() };
}
