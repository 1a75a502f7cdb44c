use crate::config::translations::{Catalog, FALLBACK_LANGUAGE};
use crate::utils::error::{Result, SkyluxError};
use crate::utils::validation::{validate_language_code, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub translations: HashMap<String, HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
        }
    }
}

fn default_language() -> String {
    FALLBACK_LANGUAGE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_enabled")]
    pub enabled: bool,
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: default_export_enabled(),
            output_path: default_output_path(),
        }
    }
}

fn default_export_enabled() -> bool {
    true
}

fn default_output_path() -> String {
    "./output".to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SkyluxError::IoError)?;
        tracing::debug!("Loaded configuration from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SkyluxError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SKYLUX_OUTPUT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 內建翻譯加上設定檔覆寫，並確認預設語言存在
    pub fn catalog(&self) -> Result<Catalog> {
        let mut catalog = Catalog::builtin();

        // 依代碼排序，錯誤訊息才會穩定
        let mut codes: Vec<&String> = self.translations.keys().collect();
        codes.sort();
        for code in codes {
            catalog.apply_overrides(code, &self.translations[code])?;
        }

        if !catalog.contains(&self.session.default_language) {
            return Err(SkyluxError::InvalidConfigValueError {
                field: "session.default_language".to_string(),
                value: self.session.default_language.clone(),
                reason: "No translation table for this language".to_string(),
            });
        }

        Ok(catalog)
    }

    pub fn default_language(&self) -> &str {
        &self.session.default_language
    }

    pub fn output_path(&self) -> &str {
        &self.export.output_path
    }

    pub fn export_enabled(&self) -> bool {
        self.export.enabled
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_language_code("session.default_language", &self.session.default_language)?;

        if self.export.enabled {
            validate_path("export.output_path", &self.export.output_path)?;
        }

        self.catalog().map(|_| ())
    }
}
