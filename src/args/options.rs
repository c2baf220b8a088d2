//! Option mappings and the host side that resolves them.

use serde_json::{Map, Value};

use crate::args::error::ArgError;

/// Option key → value mapping.
pub type OptionMap = Map<String, Value>;

/// Host that turns computed defaults into effective options.
///
/// Implementations receive the default mapping and return it with their own
/// overrides applied. The merge policy belongs to the provider.
pub trait OptionProvider {
    fn resolve_options(&self, defaults: OptionMap) -> Result<OptionMap, ArgError>;
}

/// Effective options are the defaults, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Defaults;

impl OptionProvider for Defaults {
    fn resolve_options(&self, defaults: OptionMap) -> Result<OptionMap, ArgError> {
        Ok(defaults)
    }
}

/// Fixed overrides laid over the defaults.
///
/// Keys no argument declares are kept in the effective mapping.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    values: OptionMap,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: OptionMap) -> Self {
        Self { values }
    }

    /// Add one override. Later calls for the same key win.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OptionProvider for Overrides {
    fn resolve_options(&self, mut defaults: OptionMap) -> Result<OptionMap, ArgError> {
        for (key, value) in &self.values {
            defaults.insert(key.clone(), value.clone());
        }
        Ok(defaults)
    }
}

/// Overrides read from environment variables.
///
/// For each default key `out-dir`, looks up `<prefix>OUT_DIR`. Only keys
/// already present in the defaults are considered.
#[derive(Debug, Clone)]
pub struct EnvOptions {
    prefix: String,
    vars: Vec<(String, String)>,
}

impl EnvOptions {
    /// Snapshot the process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_env(prefix: impl Into<String>) -> Self {
        let vars = std::env::vars_os().filter_map(|(k, v)| {
            match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (k, _) => {
                    tracing::debug!(var = ?k, "Skipping non-Unicode environment variable");
                    None
                }
            }
        });
        Self::from_vars(prefix, vars)
    }

    /// Use an explicit set of variables instead of the process environment.
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Environment variable name consulted for `key`.
    pub fn var_name(&self, key: &str) -> String {
        let suffix: String = key
            .chars()
            .map(|c| match c {
                '-' | '.' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        format!("{}{}", self.prefix, suffix)
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl OptionProvider for EnvOptions {
    fn resolve_options(&self, mut defaults: OptionMap) -> Result<OptionMap, ArgError> {
        let keys: Vec<String> = defaults.keys().cloned().collect();
        for key in keys {
            let name = self.var_name(&key);
            if let Some(raw) = self.lookup(&name) {
                tracing::debug!(option = %key, var = %name, "Option overridden from environment");
                defaults.insert(key, parse_scalar(raw));
            }
        }
        Ok(defaults)
    }
}

/// Provider backed by a closure. See [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F> {
    f: F,
}

/// Adapt a closure into an `OptionProvider`.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(OptionMap) -> Result<OptionMap, ArgError>,
{
    FromFn { f }
}

impl<F> OptionProvider for FromFn<F>
where
    F: Fn(OptionMap) -> Result<OptionMap, ArgError>,
{
    fn resolve_options(&self, defaults: OptionMap) -> Result<OptionMap, ArgError> {
        (self.f)(defaults)
    }
}

/// Ordered stack of providers. Each layer sees the previous layer's output.
#[derive(Default)]
pub struct OptionLayers {
    layers: Vec<Box<dyn OptionProvider>>,
}

impl OptionLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a layer on top of the existing ones.
    pub fn with(mut self, provider: impl OptionProvider + 'static) -> Self {
        self.layers.push(Box::new(provider));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl OptionProvider for OptionLayers {
    fn resolve_options(&self, defaults: OptionMap) -> Result<OptionMap, ArgError> {
        self.layers
            .iter()
            .try_fold(defaults, |options, layer| layer.resolve_options(options))
    }
}

/// Parse a raw string into a typed scalar.
///
/// `true`, `false`, `null` and JSON numbers become typed values; anything
/// else (including quoted JSON) is kept as a string. A number is kept only
/// if it renders back to the exact input, so `1.10` or `1e3` stay strings.
pub fn parse_scalar(raw: &str) -> Value {
    let trimmed = raw.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(v @ (Value::Bool(_) | Value::Null)) => v,
        Ok(Value::Number(n)) if n.to_string() == trimmed => Value::Number(n),
        _ => Value::String(raw.to_string()),
    }
}

/// Parse `key=value` into an option override.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing option key in '{}'", raw));
    }
    Ok((key.to_string(), parse_scalar(value)))
}
