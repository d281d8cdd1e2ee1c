//! Nearest-common-ancestor table over the class hierarchy.

use std::collections::BTreeMap;

use log::debug;

use super::hierarchy::ClassArena;

/// `join(X, Y)` for every pair of classes. Symmetric, reflexive, and
/// `join(X, Obj) = Obj`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinTable {
    table: BTreeMap<String, BTreeMap<String, String>>,
}

impl JoinTable {
    /// Builds the table from a validated, acyclic hierarchy.
    ///
    /// Each class walks its ancestors nearest-first. Every ancestor is its
    /// own join with the class, and any pair the ancestor already knows that
    /// the class lacks is the same join for the class.
    pub fn build(classes: &ClassArena) -> Self {
        let mut joins = JoinTable::default();

        for id in classes.sorted_ids() {
            let class = classes.get(id).name.clone();

            for ancestor_id in classes.ancestors(id) {
                let ancestor = classes.get(ancestor_id).name.clone();
                joins.insert(&class, &ancestor, &ancestor);

                let known: Vec<(String, String)> = joins
                    .table
                    .get(&ancestor)
                    .map(|row| row.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                    .unwrap_or_default();

                for (other, join) in known {
                    if !joins.row_contains(&class, &other) {
                        joins.insert(&class, &other, &join);
                    }
                }
            }
        }

        debug!("join table built for {} classes", joins.table.len());
        joins
    }

    fn insert(&mut self, a: &str, b: &str, join: &str) {
        self.table
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), join.to_string());
        self.table
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string(), join.to_string());
    }

    fn row_contains(&self, a: &str, b: &str) -> bool {
        self.table.get(a).is_some_and(|row| row.contains_key(b))
    }

    /// The nearest common ancestor of `a` and `b`, if both are known classes.
    pub fn join(&self, a: &str, b: &str) -> Option<&str> {
        self.table.get(a)?.get(b).map(String::as_str)
    }

    /// `a` equals `b` or descends from it.
    pub fn is_subtype(&self, a: &str, b: &str) -> bool {
        self.join(a, b) == Some(b)
    }
}
