//! Environment variable allowlist, substitution and overrides.
//!
//! Only allowlisted variables (and `VIZAI_*` prefixed ones) are resolved by
//! default so a shared config file cannot pull arbitrary secrets out of the
//! environment and send them to the generator endpoint.

use super::Config;
use regex::Regex;
use std::sync::LazyLock;

/// Overrides `generator.endpoint` after the file is parsed.
pub const ENV_ENDPOINT: &str = "VIZAI_ENDPOINT";

/// Overrides `render.host` after the file is parsed.
pub const ENV_RENDER_HOST: &str = "VIZAI_RENDER_HOST";

/// Regex pattern for matching `${VAR_NAME}` or `${VAR_NAME:-default_value}` syntax.
static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-((?:[^}\\]|\\.)*))?}")
        .expect("env-var substitution regex is a compile-time constant and must be valid")
});

/// Regex pattern for detecting `allow_all_env_vars: true` at the top level of YAML.
static ALLOW_ALL_ENV_VARS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^allow_all_env_vars:\s*true\s*$")
        .expect("allow_all_env_vars pre-scan regex is a compile-time constant and must be valid")
});

/// Environment variables that are safe to substitute in config files.
pub const ALLOWED_ENV_VARS: &[&str] = &[
    "HOME",
    "USER",
    "USERNAME",
    "USERPROFILE",
    "HOSTNAME",
    "HOST",
    "PATH",
    "TMPDIR",
    "TEMP",
    "TMP",
    "XDG_CONFIG_HOME",
    "XDG_RUNTIME_DIR",
];

/// A variable is allowed if it appears in [`ALLOWED_ENV_VARS`] or starts with `VIZAI_`.
pub fn is_env_var_allowed(var_name: &str) -> bool {
    ALLOWED_ENV_VARS.contains(&var_name) || var_name.starts_with("VIZAI_")
}

/// Substitute `${VAR_NAME}` patterns with environment variable values.
///
/// - `${VAR}` is replaced with the value of `VAR`; unset variables stay as written.
/// - `${VAR:-default}` falls back to `default` when `VAR` is unset.
/// - `$${VAR}` is an escape and produces the literal `${VAR}`.
///
/// Non-allowlisted variables are left as-is and a warning is logged.
pub fn substitute_variables(input: &str) -> String {
    substitute_variables_with_allowlist(input, false)
}

/// Substitute variables with explicit allowlist control.
pub fn substitute_variables_with_allowlist(input: &str, allow_all: bool) -> String {
    substitute_with(input, allow_all, |name| std::env::var(name).ok())
}

fn substitute_with(
    input: &str,
    allow_all: bool,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    let escaped_placeholder = "\x00ESC_DOLLAR\x00";
    let working = input.replace("$${", escaped_placeholder);

    let result = ENV_VAR_PATTERN.replace_all(&working, |caps: &regex::Captures| {
        let var_name = &caps[1];

        if !allow_all && !is_env_var_allowed(var_name) {
            log::warn!(
                "Config references non-allowlisted environment variable: ${{{var_name}}}, skipped. \
                 Add `allow_all_env_vars: true` to your config to allow all variables."
            );
            return caps[0].to_string();
        }

        match lookup(var_name) {
            Some(val) => val,
            None => caps
                .get(2)
                .map(|m| m.as_str().replace("\\}", "}"))
                .unwrap_or_else(|| caps[0].to_string()),
        }
    });

    result.replace(escaped_placeholder, "${")
}

/// Look for a top-level `allow_all_env_vars: true` before the YAML is parsed.
pub(crate) fn pre_scan_allow_all_env_vars(raw_yaml: &str) -> bool {
    ALLOW_ALL_ENV_VARS_PATTERN.is_match(raw_yaml)
}

impl Config {
    /// Apply `VIZAI_ENDPOINT` / `VIZAI_RENDER_HOST` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            log::info!("{} overrides generator endpoint: {}", ENV_ENDPOINT, endpoint);
            self.generator.endpoint = endpoint.trim().to_string();
        }
        if let Some(host) = lookup(ENV_RENDER_HOST).filter(|v| !v.trim().is_empty()) {
            log::info!("{} overrides render host: {}", ENV_RENDER_HOST, host);
            self.render.host = host.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_env(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/tester".to_string()),
            "VIZAI_PORT" => Some("8123".to_string()),
            "SECRET_TOKEN" => Some("hunter2".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_allowlisted_variable_is_substituted() {
        assert_eq!(
            substitute_with("dir: ${HOME}/x", false, fake_env),
            "dir: /home/tester/x"
        );
    }

    #[test]
    fn test_prefixed_variable_is_substituted() {
        assert_eq!(
            substitute_with("http://localhost:${VIZAI_PORT}/generate", false, fake_env),
            "http://localhost:8123/generate"
        );
    }

    #[test]
    fn test_non_allowlisted_variable_is_left_alone() {
        assert_eq!(
            substitute_with("key: ${SECRET_TOKEN}", false, fake_env),
            "key: ${SECRET_TOKEN}"
        );
    }

    #[test]
    fn test_allow_all_resolves_everything() {
        assert_eq!(
            substitute_with("key: ${SECRET_TOKEN}", true, fake_env),
            "key: hunter2"
        );
    }

    #[test]
    fn test_default_value_when_unset() {
        assert_eq!(
            substitute_with("host: ${VIZAI_RENDER:-kroki.io}", false, fake_env),
            "host: kroki.io"
        );
    }

    #[test]
    fn test_unset_without_default_is_left_alone() {
        assert_eq!(
            substitute_with("host: ${VIZAI_MISSING}", false, fake_env),
            "host: ${VIZAI_MISSING}"
        );
    }

    #[test]
    fn test_escaped_dollar_is_literal() {
        assert_eq!(substitute_with("$${HOME}", false, fake_env), "${HOME}");
    }

    #[test]
    fn test_pre_scan() {
        assert!(pre_scan_allow_all_env_vars("log_level: warn\nallow_all_env_vars: true\n"));
        assert!(!pre_scan_allow_all_env_vars("allow_all_env_vars: false\n"));
        assert!(!pre_scan_allow_all_env_vars("  allow_all_env_vars: true\n"));
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        config.apply_overrides_from(|name| match name {
            ENV_ENDPOINT => Some(" https://gen.example.com/generate ".to_string()),
            ENV_RENDER_HOST => Some("kroki.internal:8000".to_string()),
            _ => None,
        });
        assert_eq!(config.generator.endpoint, "https://gen.example.com/generate");
        assert_eq!(config.render.host, "kroki.internal:8000");
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides_from(|_| Some("   ".to_string()));
        assert_eq!(config, Config::default());
    }
}
