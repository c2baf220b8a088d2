//! Argument resolution for argset.
//!
//! Arguments are declared once and resolved against a host's options:
//!
//! ```text
//! ArgConfig → Arg → default options → OptionProvider → resolved Arg → flags
//! ```
//!
//! Each stage is a plain function over in-memory values, so it can be
//! tested without touching files or the environment.

mod arg;
mod argument;
mod error;
mod options;
mod resolver;

pub use arg::{Arg, ArgConfig, ArgKind};
pub use argument::Argument;
pub use error::ArgError;
pub use options::{
    from_fn, parse_assignment, parse_scalar, Defaults, EnvOptions, FromFn, OptionLayers,
    OptionMap, OptionProvider, Overrides,
};
pub use resolver::ArgSet;
