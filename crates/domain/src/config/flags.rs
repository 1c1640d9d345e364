use std::time::Duration;
use tracing::warn;

use super::errors::ConfigError;

/// A value that can be driven from a command-line flag.
///
/// Implementors hold a mutable borrow of the field they write to, so a
/// successful `set` is immediately visible through the owning struct once
/// the flag set is dropped.
pub trait FlagValue {
    fn set(&mut self, raw: &str) -> Result<(), ConfigError>;

    /// Current value rendered the way it would be passed on the command line.
    fn current(&self) -> String;

    /// Value type shown in help output.
    fn type_name(&self) -> &'static str;

    /// Bool flags may be given without a value (`--profiling`).
    fn is_bool_flag(&self) -> bool {
        false
    }
}

pub struct StringValue<'a>(pub &'a mut String);

impl FlagValue for StringValue<'_> {
    fn set(&mut self, raw: &str) -> Result<(), ConfigError> {
        *self.0 = raw.to_string();
        Ok(())
    }

    fn current(&self) -> String {
        self.0.clone()
    }

    fn type_name(&self) -> &'static str {
        "string"
    }
}

pub struct IntValue<'a>(pub &'a mut i32);

impl FlagValue for IntValue<'_> {
    fn set(&mut self, raw: &str) -> Result<(), ConfigError> {
        *self.0 = raw
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue(e.to_string()))?;
        Ok(())
    }

    fn current(&self) -> String {
        self.0.to_string()
    }

    fn type_name(&self) -> &'static str {
        "int"
    }
}

/// Accepts humantime durations such as `60s`, `1m30s` or `500ms`.
pub struct DurationValue<'a>(pub &'a mut Duration);

impl FlagValue for DurationValue<'_> {
    fn set(&mut self, raw: &str) -> Result<(), ConfigError> {
        *self.0 = humantime::parse_duration(raw)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        Ok(())
    }

    fn current(&self) -> String {
        humantime::format_duration(*self.0).to_string()
    }

    fn type_name(&self) -> &'static str {
        "duration"
    }
}

pub struct BoolValue<'a>(pub &'a mut bool);

impl FlagValue for BoolValue<'_> {
    fn set(&mut self, raw: &str) -> Result<(), ConfigError> {
        *self.0 = match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => true,
            "0" | "f" | "F" | "false" | "FALSE" | "False" => false,
            other => {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid boolean value {other:?}"
                )))
            }
        };
        Ok(())
    }

    fn current(&self) -> String {
        self.0.to_string()
    }

    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn is_bool_flag(&self) -> bool {
        true
    }
}

pub struct Flag<'a> {
    pub name: &'static str,
    pub usage: &'static str,
    /// Value at registration time, used as the help-text default.
    pub default: String,
    pub deprecated: Option<&'static str>,
    pub changed: bool,
    value: Box<dyn FlagValue + 'a>,
}

impl Flag<'_> {
    pub fn value(&self) -> &dyn FlagValue {
        self.value.as_ref()
    }
}

/// Ordered registry of named flags bound to configuration fields.
pub struct FlagSet<'a> {
    name: String,
    flags: Vec<Flag<'a>>,
}

impl<'a> FlagSet<'a> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a custom value. Registering the same name twice replaces
    /// the earlier binding.
    pub fn var(&mut self, value: impl FlagValue + 'a, name: &'static str, usage: &'static str) {
        self.register(value, name, usage, None);
    }

    /// Registers a custom value that logs `message` whenever it is set.
    pub fn deprecated_var(
        &mut self,
        value: impl FlagValue + 'a,
        name: &'static str,
        usage: &'static str,
        message: &'static str,
    ) {
        self.register(value, name, usage, Some(message));
    }

    fn register(
        &mut self,
        value: impl FlagValue + 'a,
        name: &'static str,
        usage: &'static str,
        deprecated: Option<&'static str>,
    ) {
        let flag = Flag {
            name,
            usage,
            default: value.current(),
            deprecated,
            changed: false,
            value: Box::new(value),
        };

        match self.flags.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = flag,
            None => self.flags.push(flag),
        }
    }

    pub fn string_var(&mut self, target: &'a mut String, name: &'static str, usage: &'static str) {
        self.var(StringValue(target), name, usage);
    }

    pub fn int_var(&mut self, target: &'a mut i32, name: &'static str, usage: &'static str) {
        self.var(IntValue(target), name, usage);
    }

    pub fn duration_var(
        &mut self,
        target: &'a mut Duration,
        name: &'static str,
        usage: &'static str,
    ) {
        self.var(DurationValue(target), name, usage);
    }

    pub fn bool_var(&mut self, target: &'a mut bool, name: &'static str, usage: &'static str) {
        self.var(BoolValue(target), name, usage);
    }

    pub fn mark_deprecated(
        &mut self,
        name: &str,
        message: &'static str,
    ) -> Result<(), ConfigError> {
        let flag = self
            .flags
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| ConfigError::UnknownFlag(name.to_string()))?;
        flag.deprecated = Some(message);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Flag<'a>> {
        self.flags.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag<'a>> {
        self.flags.iter()
    }

    /// Applies `raw` to the named flag.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), ConfigError> {
        let flag = self
            .flags
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| ConfigError::UnknownFlag(name.to_string()))?;

        flag.value
            .set(raw)
            .map_err(|source| ConfigError::InvalidArgument {
                flag: name.to_string(),
                value: raw.to_string(),
                source: Box::new(source),
            })?;
        flag.changed = true;

        if let Some(message) = flag.deprecated {
            warn!(flag = name, "Flag --{} has been deprecated, {}", name, message);
        }

        Ok(())
    }
}
