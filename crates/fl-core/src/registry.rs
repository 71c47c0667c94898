//! Mapping from user-facing output variable names to internal field names.
//!
//! Owned by whoever assembles the output plan; there is no process-wide
//! instance.

use crate::{FlError, FlResult};
use std::collections::BTreeMap;

/// Default `(user name, internal name)` pairs.
pub const DEFAULT_VARIABLES: [(&str, &str); 5] = [
    ("pg", "gagePressure"),
    ("t", "temperature"),
    ("r", "density"),
    ("v", "velocity"),
    ("a", "soundSpeed"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableRegistry {
    variables: BTreeMap<String, String>,
}

impl VariableRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with [`DEFAULT_VARIABLES`].
    pub fn with_defaults() -> Self {
        let variables = DEFAULT_VARIABLES
            .iter()
            .map(|(user, internal)| (user.to_string(), internal.to_string()))
            .collect();
        Self { variables }
    }

    /// Register a user name. Re-registering an existing user name is an error.
    pub fn register(
        &mut self,
        user_name: impl Into<String>,
        internal_name: impl Into<String>,
    ) -> FlResult<()> {
        let user_name = user_name.into();
        if self.variables.contains_key(&user_name) {
            return Err(FlError::Duplicate {
                what: format!("user variable '{user_name}' exists in registry"),
            });
        }
        self.variables.insert(user_name, internal_name.into());
        Ok(())
    }

    pub fn contains_user(&self, user_name: &str) -> bool {
        self.variables.contains_key(user_name)
    }

    pub fn contains_internal(&self, internal_name: &str) -> bool {
        self.variables.values().any(|v| v == internal_name)
    }

    pub fn internal_name(&self, user_name: &str) -> FlResult<&str> {
        self.variables
            .get(user_name)
            .map(String::as_str)
            .ok_or_else(|| FlError::NotFound {
                what: format!("user variable '{user_name}' does not exist in registry"),
            })
    }

    /// Resolve a list of requested output names, failing on the first unknown one.
    pub fn resolve_all<'a, I>(&self, user_names: I) -> FlResult<Vec<&str>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        user_names
            .into_iter()
            .map(|name| self.internal_name(name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.variables
            .iter()
            .map(|(u, i)| (u.as_str(), i.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_registered() {
        let reg = VariableRegistry::with_defaults();
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.internal_name("pg").unwrap(), "gagePressure");
        assert_eq!(reg.internal_name("t").unwrap(), "temperature");
        assert_eq!(reg.internal_name("r").unwrap(), "density");
        assert_eq!(reg.internal_name("v").unwrap(), "velocity");
        assert_eq!(reg.internal_name("a").unwrap(), "soundSpeed");
    }

    #[test]
    fn duplicate_user_name_is_rejected() {
        let mut reg = VariableRegistry::with_defaults();
        let err = reg.register("t", "totalTemperature").unwrap_err();
        assert!(matches!(err, FlError::Duplicate { .. }));
        assert_eq!(reg.internal_name("t").unwrap(), "temperature");
    }

    #[test]
    fn missing_user_name_is_an_error() {
        let reg = VariableRegistry::new();
        assert!(reg.is_empty());
        let err = reg.internal_name("m").unwrap_err();
        assert!(err.to_string().contains("'m'"));
    }

    #[test]
    fn internal_lookup_searches_values() {
        let mut reg = VariableRegistry::with_defaults();
        assert!(reg.contains_internal("soundSpeed"));
        assert!(!reg.contains_internal("machNumber"));
        reg.register("m", "machNumber").unwrap();
        assert!(reg.contains_internal("machNumber"));
        assert!(reg.contains_user("m"));
    }

    #[test]
    fn resolve_all_reports_unknown() {
        let reg = VariableRegistry::with_defaults();
        assert_eq!(
            reg.resolve_all(["pg", "a"]).unwrap(),
            vec!["gagePressure", "soundSpeed"]
        );
        assert!(reg.resolve_all(["pg", "x"]).is_err());
    }
}
