//! Argument contract — what the resolver needs from a declared argument.

use serde_json::Value;

use crate::args::error::ArgError;
use crate::args::options::OptionMap;

/// One declared CLI argument.
///
/// `ArgSet` only talks to arguments through this trait, so any type that
/// can be built from a config, report a default, and render a flag/value
/// pair can be resolved.
pub trait Argument: Clone {
    /// Descriptor the argument is built from.
    type Config;

    /// Build an argument from its config. Malformed configs are rejected here.
    fn from_config(config: Self::Config) -> Result<Self, ArgError>;

    /// Key used to look the argument up in an `OptionMap`.
    fn option_key(&self) -> &str;

    /// Value used when no option overrides the key. `Value::Null` means no default.
    fn default_value(&self) -> &Value;

    /// Resolve the current value from `options`.
    ///
    /// Consumes the argument and returns the resolved one; callers must rebind.
    fn set_value_from_options(self, options: &OptionMap) -> Result<Self, ArgError>;

    /// Flag token, or `None` if the argument contributes no flag.
    fn flag(&self) -> Option<String>;

    /// Value token, or `None` if the argument contributes no value.
    fn value(&self) -> Option<String>;
}
