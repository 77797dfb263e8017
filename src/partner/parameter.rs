//! Query string parameters sent to the partner web API.
//!
//! A [`Parameter`] is a plain `name=value` pair. Parameters are collected in a
//! `Vec` in the order they must appear in the request URL; the
//! [`ParameterList::add_if_has_value`] helper skips values that are not
//! present (empty strings, `None`).

use std::fmt;

use crate::partner::error::PartnerError;
use crate::partner::structs::AppId;

/// A single query string parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name, never empty
    pub name: String,
    /// String representation of the typed value
    pub value: String,
}

impl Parameter {
    /// Create a new [Parameter].
    ///
    /// # Arguments
    ///
    /// * `name` - The parameter name. Must not be empty.
    /// * `value` - The already stringified value.
    ///
    /// An empty name is only caught by a debug assertion. Use [`Parameter::try_new`]
    /// for names that are not known at compile time.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "parameter name must not be empty");

        Parameter {
            name,
            value: value.into(),
        }
    }

    /// Create a new [Parameter], rejecting an empty name.
    ///
    /// # Errors
    ///
    /// Returns [`PartnerError::Precondition`] if `name` is empty.
    pub fn try_new(
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, PartnerError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PartnerError::Precondition(
                "parameter name must not be empty".to_owned(),
            ));
        }

        Ok(Parameter {
            name,
            value: value.into(),
        })
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// A value that can be sent as a query string parameter.
///
/// Numbers are always present, zero included. Strings are present only when
/// non-empty.
pub trait ParameterValue {
    /// Returns the string form of the value, or `None` if the value is absent.
    fn to_parameter_value(&self) -> Option<String>;
}

macro_rules! impl_numeric_parameter_value {
    ($($t:ty),*) => {
        $(
            impl ParameterValue for $t {
                fn to_parameter_value(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_numeric_parameter_value!(u8, u16, u32, u64, usize);

impl ParameterValue for AppId {
    fn to_parameter_value(&self) -> Option<String> {
        self.0.to_parameter_value()
    }
}

impl ParameterValue for str {
    fn to_parameter_value(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_owned())
        }
    }
}

impl ParameterValue for String {
    fn to_parameter_value(&self) -> Option<String> {
        self.as_str().to_parameter_value()
    }
}

impl<T: ParameterValue + ?Sized> ParameterValue for &T {
    fn to_parameter_value(&self) -> Option<String> {
        (**self).to_parameter_value()
    }
}

impl<T: ParameterValue> ParameterValue for Option<T> {
    fn to_parameter_value(&self) -> Option<String> {
        self.as_ref().and_then(ParameterValue::to_parameter_value)
    }
}

/// Conditional insertion into an ordered parameter list.
pub trait ParameterList {
    /// Appends `name=value` if `value` is present, otherwise leaves the list untouched.
    ///
    /// Duplicate names are not checked: both entries are emitted and the
    /// server decides which one wins.
    fn add_if_has_value<V: ParameterValue + ?Sized>(&mut self, value: &V, name: &str);
}

impl ParameterList for Vec<Parameter> {
    fn add_if_has_value<V: ParameterValue + ?Sized>(&mut self, value: &V, name: &str) {
        if let Some(value) = value.to_parameter_value() {
            self.push(Parameter::new(name, value));
        }
    }
}
