//! Symbol tables and method records.
//!
//! A table maps names to the class they are currently inferred to hold.
//! A name that is absent has no known type yet; the inference engine
//! treats that as "unknown" rather than as an error.

use std::collections::BTreeMap;

use serde::Serialize;

use super::join::JoinTable;

/// Reserved entry holding a method's inferred return type.
pub const RETURN_ENTRY: &str = "return";

/// Prefix under which fields are stored, `this.x` for field `x`.
pub const FIELD_PREFIX: &str = "this.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable {
    entries: BTreeMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Overwrites an entry. Returns whether the stored type changed.
    pub fn set(&mut self, name: &str, ty: &str) -> bool {
        match self.entries.insert(name.to_string(), ty.to_string()) {
            Some(previous) => previous != ty,
            None => true,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    /// Puts back a value saved with `get`, removing the entry if there was none.
    pub fn restore(&mut self, name: &str, previous: Option<String>) {
        match previous {
            Some(ty) => {
                self.set(name, &ty);
            }
            None => {
                self.remove(name);
            }
        }
    }

    /// Joins `ty` into the entry for `name`, creating it if absent.
    ///
    /// Returns `Some(true)` if the entry changed, `Some(false)` if it already
    /// held the join, and `None` if the two types have no join.
    pub fn join_entry(&mut self, name: &str, ty: &str, joins: &JoinTable) -> Option<bool> {
        let joined = match self.entries.get(name) {
            Some(current) => joins.join(current, ty)?.to_string(),
            None => ty.to_string(),
        };
        Some(self.set(name, &joined))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, ty)| (name.as_str(), ty.as_str()))
    }

    /// Field entries, keyed by their full `this.x` name.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(name, _)| is_field(name))
    }
}

pub fn is_field(name: &str) -> bool {
    name.starts_with(FIELD_PREFIX) && name.len() > FIELD_PREFIX.len()
}

pub fn field_key(field: &str) -> String {
    format!("{}{}", FIELD_PREFIX, field)
}

/// Methods are identified by name plus exact parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodKey {
    pub name: String,
    pub parameter_types: Vec<String>,
}

impl MethodKey {
    pub fn new(name: &str, parameter_types: Vec<String>) -> Self {
        MethodKey {
            name: name.to_string(),
            parameter_types,
        }
    }
}

/// A method as stored in the `methods` of the class that declares it.
#[derive(Debug, Clone)]
pub struct MethodRecord {
    pub key: MethodKey,
    pub parameter_names: Vec<String>,
    pub table: SymbolTable,
}

impl MethodRecord {
    pub fn name(&self) -> &str {
        &self.key.name
    }

    /// `(name, type)` pairs in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parameter_names
            .iter()
            .zip(self.key.parameter_types.iter())
            .map(|(name, ty)| (name.as_str(), ty.as_str()))
    }

    pub fn return_type(&self) -> Option<&str> {
        self.table.get(RETURN_ENTRY)
    }

    pub fn matches(&self, name: &str, argument_types: &[String]) -> bool {
        self.key.name == name && self.key.parameter_types == argument_types
    }
}
