//! Bundled argument implementation configured from TOML/JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::args::argument::Argument;
use crate::args::error::ArgError;
use crate::args::options::OptionMap;

/// How an argument renders its flag and value slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    /// Flag followed by its value (e.g., `--out a.txt`). Null → nothing.
    Value,
    /// Boolean flag with no value (e.g., `--verbose`). Emitted only when true.
    Switch,
    /// Bare value with no flag (e.g., `input.txt`).
    Positional,
}

impl ArgKind {
    /// Kind used when a config leaves it unset.
    pub fn infer(default: &Value) -> Self {
        if default.is_boolean() {
            Self::Switch
        } else {
            Self::Value
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            Self::Switch => "a boolean",
            Self::Value | Self::Positional => "a scalar",
        }
    }

    /// Coerce a raw option value to what this kind stores.
    fn coerce(&self, option: &str, raw: Value) -> Result<Value, ArgError> {
        let coerced = match (self, &raw) {
            (Self::Switch, Value::Bool(_)) => Some(raw.clone()),
            (Self::Switch, Value::Null) => Some(Value::Bool(false)),
            (Self::Switch, Value::String(s)) => match s.as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            (Self::Switch, _) => None,
            (_, Value::Array(_) | Value::Object(_)) => None,
            (_, _) => Some(raw.clone()),
        };

        coerced.ok_or_else(|| ArgError::InvalidValue {
            option: option.to_string(),
            expected: self.expected(),
            found: raw.to_string(),
        })
    }
}

/// Declarative description of one argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgConfig {
    /// Option key (e.g., "out").
    pub option: String,
    /// Flag token. Defaults to `--<option>`.
    #[serde(default)]
    pub flag: Option<String>,
    /// Default value. Missing means no default.
    #[serde(default)]
    pub default: Option<Value>,
    /// Rendering kind. Inferred from the default when missing.
    #[serde(default)]
    pub kind: Option<ArgKind>,
}

impl ArgConfig {
    /// Config for a value argument with no default.
    pub fn new(option: impl Into<String>) -> Self {
        Self {
            option: option.into(),
            flag: None,
            default: None,
            kind: None,
        }
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_kind(mut self, kind: ArgKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// A resolved (or resolvable) argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    option: String,
    flag: String,
    kind: ArgKind,
    default: Value,
    value: Value,
}

impl Arg {
    pub fn kind(&self) -> ArgKind {
        self.kind
    }

    /// Current value after coercion (`Value::Null` when unset).
    pub fn current(&self) -> &Value {
        &self.value
    }

    fn rendered_value(&self) -> Option<String> {
        match &self.value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl Argument for Arg {
    type Config = ArgConfig;

    fn from_config(config: ArgConfig) -> Result<Self, ArgError> {
        if config.option.trim().is_empty() {
            return Err(ArgError::EmptyOption);
        }

        let flag = match config.flag {
            Some(flag) if flag.trim().is_empty() => {
                return Err(ArgError::EmptyFlag {
                    option: config.option,
                });
            }
            Some(flag) => flag,
            None => format!("--{}", config.option),
        };

        let default = config.default.unwrap_or(Value::Null);
        let kind = config.kind.unwrap_or_else(|| ArgKind::infer(&default));
        let value = kind.coerce(&config.option, default.clone())?;

        Ok(Self {
            option: config.option,
            flag,
            kind,
            default,
            value,
        })
    }

    fn option_key(&self) -> &str {
        &self.option
    }

    fn default_value(&self) -> &Value {
        &self.default
    }

    fn set_value_from_options(self, options: &OptionMap) -> Result<Self, ArgError> {
        let raw = options
            .get(&self.option)
            .cloned()
            .unwrap_or_else(|| self.default.clone());
        let value = self.kind.coerce(&self.option, raw)?;
        Ok(Self { value, ..self })
    }

    fn flag(&self) -> Option<String> {
        match self.kind {
            ArgKind::Switch => (self.value == Value::Bool(true)).then(|| self.flag.clone()),
            ArgKind::Value => (!self.value.is_null()).then(|| self.flag.clone()),
            ArgKind::Positional => None,
        }
    }

    fn value(&self) -> Option<String> {
        match self.kind {
            ArgKind::Switch => None,
            ArgKind::Value | ArgKind::Positional => self.rendered_value(),
        }
    }
}
