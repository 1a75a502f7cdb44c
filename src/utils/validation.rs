use crate::utils::error::{Result, SkyluxError};
use regex::Regex;
use std::sync::LazyLock;

static LANGUAGE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(-[A-Z]{2})?$").expect("language code pattern is valid")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SkyluxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SkyluxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SkyluxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 語言代碼格式：`de`、`gsw`、`pt-BR`
pub fn validate_language_code(field_name: &str, code: &str) -> Result<()> {
    if !LANGUAGE_CODE.is_match(code) {
        return Err(SkyluxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: code.to_string(),
            reason: "Language code must look like 'en' or 'pt-BR'".to_string(),
        });
    }
    Ok(())
}
