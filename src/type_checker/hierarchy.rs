//! Class records and hierarchy validation.
//!
//! All class records live in a `ClassArena` and refer to their superclass
//! by `ClassId`, so a forward reference or a cyclic `extends` chain can
//! never leave a dangling link. A superclass that is referenced before its
//! definition gets a placeholder record whose `superclass` stays `None`
//! until the definition is seen.

use std::{collections::HashMap, rc::Rc};

use log::debug;

use crate::{
    ast::ast::ClassDecl,
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    builtins::{is_builtin, BUILTIN_CLASSES, BUILTIN_METHODS, ROOT_CLASS},
    symbols::{MethodKey, MethodRecord, SymbolTable, RETURN_ENTRY},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

#[derive(Debug, Clone)]
pub struct ClassRecord {
    pub name: String,
    pub superclass: Option<ClassId>,
    pub cycle_free: bool,
    pub builtin: bool,
    /// Methods in declaration order.
    pub methods: Vec<MethodRecord>,
    /// Class-level symbol table: `this`, constructor arguments, class-body
    /// locals and `this.x` fields.
    pub table: SymbolTable,
    pub position: Position,
}

impl ClassRecord {
    fn new(name: &str, position: Position) -> Self {
        ClassRecord {
            name: name.to_string(),
            superclass: None,
            cycle_free: false,
            builtin: false,
            methods: Vec::new(),
            table: SymbolTable::new(),
            position,
        }
    }

    /// A method declared directly on this class with exactly these parameter types.
    pub fn method(&self, name: &str, argument_types: &[String]) -> Option<&MethodRecord> {
        self.methods.iter().find(|method| method.matches(name, argument_types))
    }

    pub fn method_index(&self, key: &MethodKey) -> Option<usize> {
        self.methods.iter().position(|method| &method.key == key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassArena {
    records: Vec<ClassRecord>,
    lookup: HashMap<String, ClassId>,
}

impl ClassArena {
    /// An arena holding only the built-in classes and their methods.
    pub fn with_builtins() -> Self {
        let mut arena = ClassArena::default();
        let position = Position(0, Rc::new(String::from("<builtin>")));

        for name in BUILTIN_CLASSES {
            let mut record = ClassRecord::new(name, position.clone());
            record.builtin = true;
            record.cycle_free = true;

            for builtin in BUILTIN_METHODS.get(name).into_iter().flatten() {
                let mut table = SymbolTable::new();
                table.set(RETURN_ENTRY, builtin.return_type);
                record.methods.push(MethodRecord {
                    key: MethodKey::new(
                        builtin.name,
                        builtin.parameters.iter().map(|ty| ty.to_string()).collect(),
                    ),
                    parameter_names: (0..builtin.parameters.len()).map(|i| format!("arg{}", i)).collect(),
                    table,
                });
            }

            arena.insert(record);
        }

        let root = arena.lookup[ROOT_CLASS];
        for name in BUILTIN_CLASSES.iter().filter(|name| **name != ROOT_CLASS) {
            let id = arena.lookup[*name];
            arena.records[id.0].superclass = Some(root);
        }

        arena
    }

    fn insert(&mut self, record: ClassRecord) -> ClassId {
        let id = ClassId(self.records.len());
        self.lookup.insert(record.name.clone(), id);
        self.records.push(record);
        id
    }

    pub fn id_of(&self, name: &str) -> Option<ClassId> {
        self.lookup.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn get(&self, id: ClassId) -> &ClassRecord {
        &self.records[id.0]
    }

    pub fn get_mut(&mut self, id: ClassId) -> &mut ClassRecord {
        &mut self.records[id.0]
    }

    pub fn by_name(&self, name: &str) -> Option<&ClassRecord> {
        self.id_of(name).map(|id| self.get(id))
    }

    pub fn class_count(&self) -> usize {
        self.records.len()
    }

    /// Every class, ordered by name.
    pub fn sorted_ids(&self) -> Vec<ClassId> {
        let mut ids: Vec<ClassId> = self.lookup.values().copied().collect();
        ids.sort_by(|a, b| self.get(*a).name.cmp(&self.get(*b).name));
        ids
    }

    /// User-defined classes, ordered by name.
    pub fn user_ids(&self) -> Vec<ClassId> {
        self.sorted_ids()
            .into_iter()
            .filter(|id| !self.get(*id).builtin)
            .collect()
    }

    /// `id` followed by its ancestors, nearest first.
    ///
    /// Stops after visiting every record once, so even an unvalidated
    /// cyclic chain is walked in bounded time.
    pub fn ancestors(&self, id: ClassId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: Some(id),
            remaining: self.records.len(),
        }
    }

    /// Exact-signature dispatch: the nearest class in `id`'s ancestry that
    /// declares `name` with these parameter types.
    pub fn find_method(&self, id: ClassId, name: &str, argument_types: &[String]) -> Option<&MethodRecord> {
        self.ancestors(id)
            .find_map(|ancestor| self.get(ancestor).method(name, argument_types))
    }

    /// Field type for `this.x`-style key, searching the class and then its ancestors.
    pub fn find_field(&self, id: ClassId, key: &str) -> Option<&str> {
        self.ancestors(id).find_map(|ancestor| self.get(ancestor).table.get(key))
    }
}

pub struct Ancestors<'a> {
    arena: &'a ClassArena,
    next: Option<ClassId>,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = ClassId;

    fn next(&mut self) -> Option<ClassId> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self.arena.get(current).superclass;
        Some(current)
    }
}

/// Builds the class arena from the parsed class list and validates it.
///
/// Fails on redefinition of any class, on extending a built-in other than
/// `Obj`, on a superclass that is never defined and on inheritance cycles.
pub fn build_hierarchy(classes: &[ClassDecl]) -> Result<ClassArena, Error> {
    let mut arena = ClassArena::with_builtins();

    for class in classes {
        let position = class.span.start.clone();
        let superclass = &class.superclass;

        if is_builtin(&class.name) {
            return Err(Error::new(
                ErrorImpl::ClassRedefinition { class: class.name.clone() },
                position,
            ));
        }

        if is_builtin(&superclass.name) && superclass.name != ROOT_CLASS {
            return Err(Error::new(
                ErrorImpl::ExtendsBuiltin {
                    class: class.name.clone(),
                    superclass: superclass.name.clone(),
                },
                superclass.get_position(),
            ));
        }

        let id = match arena.id_of(&class.name) {
            // A placeholder left by an earlier `extends`; a linked record is a real redefinition.
            Some(id) if arena.get(id).superclass.is_some() => {
                return Err(Error::new(
                    ErrorImpl::ClassRedefinition { class: class.name.clone() },
                    position,
                ));
            }
            Some(id) => {
                arena.get_mut(id).position = position;
                id
            }
            None => arena.insert(ClassRecord::new(&class.name, position)),
        };

        let super_id = match arena.id_of(&superclass.name) {
            Some(super_id) => super_id,
            None => arena.insert(ClassRecord::new(&superclass.name, superclass.get_position())),
        };

        arena.get_mut(id).superclass = Some(super_id);
    }

    for id in arena.sorted_ids() {
        let record = arena.get(id);
        if record.superclass.is_none() && record.name != ROOT_CLASS {
            return Err(Error::new(
                ErrorImpl::UndefinedClass { class: record.name.clone() },
                record.position.clone(),
            ));
        }
    }

    check_cycles(&mut arena)?;

    debug!("hierarchy validated: {} classes", arena.class_count());
    Ok(arena)
}

fn super_of(arena: &ClassArena, id: ClassId) -> Option<ClassId> {
    arena.get(id).superclass
}

/// Tortoise-and-hare walk up every chain. Nodes already confirmed acyclic
/// end a walk early and every node on a finished walk is confirmed.
fn check_cycles(arena: &mut ClassArena) -> Result<(), Error> {
    for id in arena.sorted_ids() {
        if arena.get(id).cycle_free {
            continue;
        }

        let mut slow = Some(id);
        let mut fast = super_of(arena, id);

        while let (Some(s), Some(f)) = (slow, fast) {
            if arena.get(s).cycle_free || arena.get(f).cycle_free {
                break;
            }
            if s == f {
                let record = arena.get(s);
                return Err(Error::new(
                    ErrorImpl::InheritanceCycle { class: record.name.clone() },
                    record.position.clone(),
                ));
            }

            slow = super_of(arena, s);
            // The hare takes two single steps so it can stop on a confirmed node.
            fast = super_of(arena, f).and_then(|next| {
                if arena.get(next).cycle_free {
                    Some(next)
                } else {
                    super_of(arena, next)
                }
            });
        }

        let mut current = Some(id);
        while let Some(c) = current {
            if arena.get(c).cycle_free {
                break;
            }
            arena.get_mut(c).cycle_free = true;
            current = super_of(arena, c);
        }
    }

    Ok(())
}
