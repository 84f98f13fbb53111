use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::{DEFAULT_DIFFICULTY, DEFAULT_RETRIES};
use crate::services::prompt::{PromptTemplate, QUIZ_PROMPT};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "quiz.toml";

/// 程序配置
///
/// 来源优先级：环境变量 > 配置文件 > 默认值。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    // --- 出题配置 ---
    /// 默认难度
    pub difficulty: String,
    /// 每道题最多尝试次数
    pub max_retries: u32,
    /// 未指定时的题目数量
    pub default_question_count: usize,
    /// 出题提示词模板，需包含 {subject} 和 {difficulty}
    pub prompt_template: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.0-flash".to_string(),
            llm_temperature: 0.7,
            llm_max_tokens: 1024,
            difficulty: DEFAULT_DIFFICULTY.to_string(),
            max_retries: DEFAULT_RETRIES,
            default_question_count: 5,
            prompt_template: QUIZ_PROMPT.to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → 配置文件（QUIZ_CONFIG 或 ./quiz.toml，存在时）→ 环境变量，最后校验
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("QUIZ_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_toml_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// 默认值 + 环境变量，不校验
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// 从 TOML 文件读取，缺省字段取默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖当前值
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(key) = get("LLM_API_KEY").or_else(|| get("GEMINI_API_KEY")) {
            self.llm_api_key = key;
        }
        if let Some(url) = get("LLM_API_BASE_URL") {
            self.llm_api_base_url = url;
        }
        if let Some(model) = get("LLM_MODEL_NAME") {
            self.llm_model_name = model;
        }
        if let Some(difficulty) = get("QUIZ_DIFFICULTY") {
            self.difficulty = difficulty;
        }
        parse_var(&get, "LLM_TEMPERATURE", "f32", &mut self.llm_temperature)?;
        parse_var(&get, "LLM_MAX_TOKENS", "u32", &mut self.llm_max_tokens)?;
        parse_var(&get, "QUIZ_MAX_RETRIES", "u32", &mut self.max_retries)?;
        parse_var(
            &get,
            "QUIZ_QUESTION_COUNT",
            "usize",
            &mut self.default_question_count,
        )?;
        parse_var(&get, "VERBOSE_LOGGING", "bool", &mut self.verbose_logging)?;
        Ok(())
    }

    /// 检查必填项和取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::Missing {
                name: "llm_api_key",
                env_hint: "LLM_API_KEY / GEMINI_API_KEY",
            });
        }
        if self.max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_retries",
                reason: "至少为 1".to_string(),
            });
        }
        if self.default_question_count == 0 {
            return Err(ConfigError::InvalidValue {
                name: "default_question_count",
                reason: "至少为 1".to_string(),
            });
        }
        self.prompt()?;
        Ok(())
    }

    /// 解析提示词模板
    pub fn prompt(&self) -> Result<PromptTemplate, ConfigError> {
        PromptTemplate::new(&self.prompt_template)
    }
}

fn parse_var<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
    target: &mut T,
) -> Result<(), ConfigError> {
    if let Some(value) = get(var_name) {
        match value.trim().parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => {
                return Err(ConfigError::EnvVarParseFailed {
                    var_name: var_name.to_string(),
                    value,
                    expected_type: expected_type.to_string(),
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.difficulty, "medium");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.default_question_count, 5);
        assert!(config.prompt().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_vars(vars(&[
                ("GEMINI_API_KEY", "g-key"),
                ("LLM_MODEL_NAME", "gemini-pro"),
                ("QUIZ_MAX_RETRIES", "5"),
                ("VERBOSE_LOGGING", "true"),
            ]))
            .unwrap();
        assert_eq!(config.llm_api_key, "g-key");
        assert_eq!(config.llm_model_name, "gemini-pro");
        assert_eq!(config.max_retries, 5);
        assert!(config.verbose_logging);
    }

    #[test]
    fn test_llm_api_key_wins_over_gemini_key() {
        let mut config = Config::default();
        config
            .apply_vars(vars(&[("LLM_API_KEY", "primary"), ("GEMINI_API_KEY", "fallback")]))
            .unwrap();
        assert_eq!(config.llm_api_key, "primary");
    }

    #[test]
    fn test_unparseable_env_value_is_an_error() {
        let mut config = Config::default();
        let err = config
            .apply_vars(vars(&[("QUIZ_MAX_RETRIES", "three")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvVarParseFailed { ref var_name, .. } if var_name == "QUIZ_MAX_RETRIES"
        ));
    }

    #[test]
    fn test_toml_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
llm_api_key = "file-key"
difficulty = "hard"
"#,
        )
        .unwrap();
        assert_eq!(config.llm_api_key, "file-key");
        assert_eq!(config.difficulty, "hard");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.llm_model_name, "gemini-2.0-flash");
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(matches!(config.validate(), Err(ConfigError::Missing { .. })));

        config.llm_api_key = "key".to_string();
        assert!(config.validate().is_ok());

        config.max_retries = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { name: "max_retries", .. })
        ));

        config.max_retries = 3;
        config.prompt_template = "no slots at all".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPromptTemplate(_))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_toml_file(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }
}
