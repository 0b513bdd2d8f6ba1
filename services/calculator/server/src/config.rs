use rocket::figment::{providers::Env, Figment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Longer expressions are rejected without being parsed
    pub max_expression_length: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig {
            max_expression_length: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub calculator: CalculatorConfig,
}

/// Rocket's figment with `APP_` environment overrides
///
/// The first `_` after the prefix separates the section from the key, so
/// `APP_CALCULATOR_MAX_EXPRESSION_LENGTH` sets `calculator.max_expression_length`
pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(Env::prefixed("APP_").map(|s| s.as_str().replacen('_', ".", 1).into()))
}
