//! Layered configuration: defaults, then the TOML file named by
//! `PLS7_CONFIG`, then `PLS7_*` environment variables, then flags.
//! Every field remembers which layer set it.

use std::fs;
use std::path::{Path, PathBuf};

use pls7_engine::rules::GameRules;
use serde::{Deserialize, Serialize};

use crate::io_utils::read_text;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Preset name (`pls7`, `pls`, `nlh`) or a path to a rules TOML file
    pub rule: String,
    pub difficulty: String,
    pub initial_chips: u32,
    /// The big blind is always twice this
    pub small_blind: u32,
    /// Hands between blind doublings; 0 disables
    pub blind_up_interval: u32,
    pub seed: Option<u64>,
    pub save_dir: PathBuf,
    pub cpu_think_ms: u64,
    pub dev: bool,
    /// List the human's outs on the flop and turn (always on with `dev`)
    pub show_outs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rule: "pls7".into(),
            difficulty: "medium".into(),
            initial_chips: 300_000,
            small_blind: 500,
            blind_up_interval: 2,
            seed: None,
            save_dir: PathBuf::from("saves"),
            cpu_think_ms: 0,
            dev: false,
            show_outs: false,
        }
    }
}

impl Config {
    pub fn big_blind(&self) -> Result<u32, ConfigError> {
        self.small_blind
            .checked_mul(2)
            .ok_or_else(|| ConfigError::Invalid("small-blind is too large".into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub rule: ValueSource,
    pub difficulty: ValueSource,
    pub initial_chips: ValueSource,
    pub small_blind: ValueSource,
    pub blind_up_interval: ValueSource,
    pub seed: ValueSource,
    pub save_dir: ValueSource,
    pub cpu_think_ms: ValueSource,
    pub dev: ValueSource,
    pub show_outs: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            rule: ValueSource::Default,
            difficulty: ValueSource::Default,
            initial_chips: ValueSource::Default,
            small_blind: ValueSource::Default,
            blind_up_interval: ValueSource::Default,
            seed: ValueSource::Default,
            save_dir: ValueSource::Default,
            cpu_think_ms: ValueSource::Default,
            dev: ValueSource::Default,
            show_outs: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagOverrides {
    pub rule: Option<String>,
    pub difficulty: Option<String>,
    pub initial_chips: Option<u32>,
    pub small_blind: Option<u32>,
    pub blind_up_interval: Option<u32>,
    pub seed: Option<u64>,
    pub save_dir: Option<PathBuf>,
    pub cpu_think_ms: Option<u64>,
    pub dev: bool,
    pub show_outs: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse TOML: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Resolves the configuration from the process environment and `flags`.
pub fn load_with_sources(flags: &FlagOverrides) -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok(), flags)
}

/// Same as [`load_with_sources`] with an injectable environment lookup.
pub fn resolve<F>(env: F, flags: &FlagOverrides) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(path) = env("PLS7_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        macro_rules! from_file {
            ($field:ident) => {
                if let Some(v) = f.$field {
                    cfg.$field = v;
                    sources.$field = ValueSource::File;
                }
            };
        }
        from_file!(rule);
        from_file!(difficulty);
        from_file!(initial_chips);
        from_file!(small_blind);
        from_file!(blind_up_interval);
        from_file!(save_dir);
        from_file!(cpu_think_ms);
        from_file!(dev);
        from_file!(show_outs);
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(seed) = env("PLS7_SEED") {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid PLS7_SEED '{}'", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(rule) = env("PLS7_RULE") {
        cfg.rule = rule;
        sources.rule = ValueSource::Env;
    }
    if let Some(difficulty) = env("PLS7_DIFFICULTY") {
        cfg.difficulty = difficulty;
        sources.difficulty = ValueSource::Env;
    }
    if let Some(dir) = env("PLS7_SAVE_DIR") {
        cfg.save_dir = PathBuf::from(dir);
        sources.save_dir = ValueSource::Env;
    }

    macro_rules! from_flag {
        ($field:ident) => {
            if let Some(v) = flags.$field.clone() {
                cfg.$field = v;
                sources.$field = ValueSource::Flag;
            }
        };
    }
    from_flag!(rule);
    from_flag!(difficulty);
    from_flag!(initial_chips);
    from_flag!(small_blind);
    from_flag!(blind_up_interval);
    from_flag!(save_dir);
    from_flag!(cpu_think_ms);
    if let Some(seed) = flags.seed {
        cfg.seed = Some(seed);
        sources.seed = ValueSource::Flag;
    }
    if flags.dev {
        cfg.dev = true;
        sources.dev = ValueSource::Flag;
    }
    if flags.show_outs {
        cfg.show_outs = true;
        sources.show_outs = ValueSource::Flag;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    rule: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    initial_chips: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    blind_up_interval: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    save_dir: Option<PathBuf>,
    #[serde(default)]
    cpu_think_ms: Option<u64>,
    #[serde(default)]
    dev: Option<bool>,
    #[serde(default)]
    show_outs: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.initial_chips == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: initial-chips must be > 0".into(),
        ));
    }
    if cfg.small_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small-blind must be > 0".into(),
        ));
    }
    cfg.big_blind()?;
    Ok(())
}

/// Loads a variant descriptor: a built-in preset name, or a path to a TOML
/// file holding a `GameRules` table. The result is validated.
pub fn load_rules(rule: &str) -> Result<GameRules, ConfigError> {
    let rules = match GameRules::preset(rule) {
        Some(rules) => rules,
        None => {
            let path = Path::new(rule);
            if !path.is_file() {
                return Err(ConfigError::Invalid(format!(
                    "unknown rule '{}' (expected one of {} or a rules .toml file)",
                    rule,
                    GameRules::preset_names().join(", ")
                )));
            }
            toml::from_str(&read_text(path)?)?
        }
    };
    rules
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    Ok(rules)
}
