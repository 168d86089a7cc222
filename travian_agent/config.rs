use std::{collections::HashMap, env, fs, path::{Path, PathBuf}};

use regex::Regex;
use serde::Deserialize;
use travian_game::strategy::StrategyConfig;

use crate::error::AgentError;

#[derive(Debug, Clone, Deserialize)]
pub struct DriverConfig {
    pub server_url: String,
    pub user_login: String,
    pub user_password: String,
    #[serde(default = "default_true")]
    pub headless: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogicConfig {
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub strategy: StrategyName,
    #[serde(default = "default_storage_hours")]
    pub minimum_storage_capacity_in_hours: f64,
    #[serde(default = "default_daily_quest_threshold")]
    pub daily_quest_threshold: u32,
}

fn default_speed() -> f64 {
    1.0
}
fn default_storage_hours() -> f64 {
    24.0
}
fn default_daily_quest_threshold() -> u32 {
    50
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    #[default]
    BalancedEconomicGrowth,
    DefendArmy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeroAdventuresConfig {
    #[serde(default = "default_minimal_health", rename = "minimal-health")]
    pub minimal_health: u16,
    #[serde(default, rename = "increase-difficulty")]
    pub increase_difficulty: bool,
}

fn default_minimal_health() -> u16 {
    50
}

impl Default for HeroAdventuresConfig {
    fn default() -> Self {
        Self {
            minimal_health: default_minimal_health(),
            increase_difficulty: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeroResourcesConfig {
    #[serde(default, rename = "support-villages")]
    pub support_villages: bool,
    #[serde(default, rename = "attributes-ratio")]
    pub attributes_ratio: HashMap<String, f64>,
    #[serde(default, rename = "attributes-steps")]
    pub attributes_steps: HashMap<String, u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeroConfig {
    #[serde(default)]
    pub adventures: HeroAdventuresConfig,
    #[serde(default)]
    pub resources: HeroResourcesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub driver: DriverConfig,
    #[serde(default)]
    pub logic: LogicConfig,
    #[serde(default)]
    pub hero: HeroConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LogicConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            strategy: StrategyName::default(),
            minimum_storage_capacity_in_hours: default_storage_hours(),
            daily_quest_threshold: default_daily_quest_threshold(),
        }
    }
}

const ATTRIBUTE_KEYS: [(&str, usize); 4] = [
    ("fighting-strength", travian_game::job::FIGHTING_STRENGTH),
    ("off-bonus", travian_game::job::OFF_BONUS),
    ("def-bonus", travian_game::job::DEF_BONUS),
    ("production-points", travian_game::job::PRODUCTION_POINTS),
];

impl Config {
    /// §6.3/§10.3: finds the config file, applies `${VAR}` substitution,
    /// then parses YAML. `explicit_path` is the CLI-supplied override, if
    /// any.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, AgentError> {
        dotenvy::dotenv().ok();
        let path = discover_config_path(explicit_path)?;
        let raw = fs::read_to_string(&path)
            .map_err(|e| AgentError::Config(format!("cannot read {}: {e}", path.display())))?;
        let substituted = substitute_env_vars(&raw);
        let config: Config = serde_yaml::from_str(&substituted)
            .map_err(|e| AgentError::Config(format!("invalid YAML in {}: {e}", path.display())))?;
        Ok(config)
    }

    /// Converts the YAML hero-attribute mappings into the positional arrays
    /// `StrategyConfig` expects, in the shared `[fighting_strength, off_bonus,
    /// def_bonus, production_points]` order.
    pub fn to_strategy_config(&self) -> StrategyConfig {
        let mut attributes_ratio = [0.25; 4];
        let mut attributes_steps = [0u32; 4];
        for (key, index) in ATTRIBUTE_KEYS {
            if let Some(v) = self.hero.resources.attributes_ratio.get(key) {
                attributes_ratio[index] = v / 100.0;
            }
            if let Some(v) = self.hero.resources.attributes_steps.get(key) {
                attributes_steps[index] = *v;
            }
        }
        StrategyConfig {
            minimal_hero_health: self.hero.adventures.minimal_health,
            minimum_storage_capacity_hours: self.logic.minimum_storage_capacity_in_hours,
            daily_quest_threshold: self.logic.daily_quest_threshold,
            attributes_steps,
            attributes_ratio,
            ..Default::default()
        }
    }
}

/// Discovery order per §10.3: explicit path → `CONFIG_PATH` env var →
/// `./config.yaml` → walk parents of CWD → package-adjacent `config.yaml`.
/// An explicit path or `CONFIG_PATH` naming a file that doesn't exist is a
/// hard error; only exhausting every fallback is a "not found" error.
fn discover_config_path(explicit_path: Option<&Path>) -> Result<PathBuf, AgentError> {
    if let Some(path) = explicit_path {
        return existing_or_error(path);
    }
    if let Ok(env_path) = env::var("CONFIG_PATH") {
        return existing_or_error(Path::new(&env_path));
    }

    let cwd = env::current_dir().map_err(|e| AgentError::Config(e.to_string()))?;
    let candidate = cwd.join("config.yaml");
    if candidate.is_file() {
        return Ok(candidate);
    }
    for ancestor in cwd.ancestors().skip(1) {
        let candidate = ancestor.join("config.yaml");
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    let package_adjacent = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.yaml");
    if package_adjacent.is_file() {
        return Ok(package_adjacent);
    }

    Err(AgentError::Config(
        "no config.yaml found: checked CWD, its parents, and the package directory".to_string(),
    ))
}

fn existing_or_error(path: &Path) -> Result<PathBuf, AgentError> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(AgentError::Config(format!(
            "config path {} does not exist",
            path.display()
        )))
    }
}

/// Replaces every `${VAR}` occurrence with the matching environment
/// variable, leaving the token untouched when the variable is unset.
fn substitute_env_vars(raw: &str) -> String {
    let pattern = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static pattern compiles");
    pattern
        .replace_all(raw, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_vars_and_leaves_unknown_untouched() {
        unsafe {
            env::set_var("TRAVIAN_TEST_VAR", "secret");
        }
        let out = substitute_env_vars("login: ${TRAVIAN_TEST_VAR}\nother: ${MISSING_TOKEN}");
        assert!(out.contains("login: secret"));
        assert!(out.contains("other: ${MISSING_TOKEN}"));
    }

    #[test]
    fn discover_config_path_errors_on_missing_explicit_path() {
        let err = discover_config_path(Some(Path::new("/does/not/exist/config.yaml")));
        assert!(err.is_err());
    }

    #[test]
    fn to_strategy_config_converts_percentages_to_ratios() {
        let mut ratio = HashMap::new();
        ratio.insert("off-bonus".to_string(), 50.0);
        let config = Config {
            driver: DriverConfig {
                server_url: "https://example.test".to_string(),
                user_login: "user".to_string(),
                user_password: "pass".to_string(),
                headless: true,
            },
            logic: LogicConfig::default(),
            hero: HeroConfig {
                resources: HeroResourcesConfig {
                    attributes_ratio: ratio,
                    ..Default::default()
                },
                ..Default::default()
            },
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        };
        let strategy_config = config.to_strategy_config();
        assert_eq!(strategy_config.attributes_ratio[travian_game::job::OFF_BONUS], 0.5);
    }
}
