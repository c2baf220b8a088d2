use serde::{Deserialize, Serialize};

use crate::args::{ArgConfig, OptionMap};

/// Argument declaration file.
///
/// ```toml
/// [[arg]]
/// option = "out"
/// default = "a.txt"
///
/// [options]
/// out = "b.txt"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgsFile {
    /// Declared arguments, in flag order.
    #[serde(rename = "arg", default)]
    pub args: Vec<ArgConfig>,
    /// Overrides shipped alongside the declarations.
    #[serde(default)]
    pub options: OptionMap,
}
