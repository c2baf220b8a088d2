//! Argument set resolver — configs → effective options → flag tokens.

use crate::args::arg::Arg;
use crate::args::argument::Argument;
use crate::args::error::ArgError;
use crate::args::options::{OptionMap, OptionProvider};

/// An ordered set of arguments resolved against effective options.
///
/// Always fully resolved: construction asks the provider for options and
/// pushes them into every argument before returning.
#[derive(Debug, Clone)]
pub struct ArgSet<A: Argument = Arg> {
    args: Vec<A>,
    options: OptionMap,
}

impl<A: Argument> ArgSet<A> {
    /// Build arguments from `configs` and resolve them through `provider`.
    ///
    /// The provider is called exactly once, with the default options.
    pub fn new<P, I>(provider: &P, configs: I) -> Result<Self, ArgError>
    where
        P: OptionProvider + ?Sized,
        I: IntoIterator<Item = A::Config>,
    {
        let args = configs
            .into_iter()
            .map(A::from_config)
            .collect::<Result<Vec<_>, _>>()?;

        let defaults = default_options(&args);
        let options = provider.resolve_options(defaults)?;
        tracing::debug!(
            args = args.len(),
            options = options.len(),
            "Resolved effective options"
        );

        let mut set = Self { args, options };
        set.set_arg_values_from_options()?;
        Ok(set)
    }

    /// Default options: `option_key → default_value` for every argument.
    ///
    /// On duplicate keys the later argument wins.
    pub fn generate_default_options(&self) -> OptionMap {
        default_options(&self.args)
    }

    /// Re-resolve every argument from the current options.
    ///
    /// Order and length are preserved. If any argument fails, the previous
    /// resolved arguments are kept.
    pub fn set_arg_values_from_options(&mut self) -> Result<&mut Self, ArgError> {
        self.args = resolve_all(&self.args, &self.options)?;
        Ok(self)
    }

    /// Replace the effective options and re-resolve, bypassing the provider.
    ///
    /// On failure both options and arguments are left unchanged.
    pub fn set_options(&mut self, options: OptionMap) -> Result<&mut Self, ArgError> {
        self.args = resolve_all(&self.args, &options)?;
        self.options = options;
        Ok(self)
    }

    /// Flag tokens for all arguments, in order.
    ///
    /// Each argument contributes `[flag, value]`; absent slots are dropped
    /// independently, so a flag may appear without a value and vice versa.
    pub fn arg_flags(&self) -> Vec<String> {
        let flags: Vec<String> = self
            .args
            .iter()
            .flat_map(|arg| [arg.flag(), arg.value()])
            .flatten()
            .collect();
        tracing::trace!(?flags, "Derived argument flags");
        flags
    }

    /// Resolved arguments, in configuration order.
    pub fn args(&self) -> &[A] {
        &self.args
    }

    /// Effective options the arguments were last resolved against.
    pub fn options(&self) -> &OptionMap {
        &self.options
    }
}

fn default_options<A: Argument>(args: &[A]) -> OptionMap {
    args.iter().fold(OptionMap::new(), |mut options, arg| {
        let key = arg.option_key();
        if options
            .insert(key.to_string(), arg.default_value().clone())
            .is_some()
        {
            tracing::debug!(option = %key, "Duplicate option key, later default wins");
        }
        options
    })
}

fn resolve_all<A: Argument>(args: &[A], options: &OptionMap) -> Result<Vec<A>, ArgError> {
    args.iter()
        .cloned()
        .map(|arg| arg.set_value_from_options(options))
        .collect()
}
