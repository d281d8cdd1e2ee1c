use std::{collections::BTreeSet, time::Instant};

use log::{debug, info};

use crate::{
    ast::ast::{ClassDecl, MethodDecl, Program},
    errors::errors::{Error, ErrorImpl},
};

use super::{
    builtins::NOTHING_CLASS,
    hierarchy::{build_hierarchy, ClassArena, ClassId},
    inference::{check_stmts, has_value_return, register_methods, Declared, Scope},
    join::JoinTable,
    overrides::validate_overrides,
    report::Report,
    symbols::{field_key, SymbolTable, RETURN_ENTRY},
};

/// State of the inference fixed point over one program.
///
/// Class tables live in the arena and method tables in their records;
/// both persist across passes and are refined in place, so methods
/// analysed later in a pass see what earlier ones inferred.
#[derive(Debug)]
pub struct TypeChecker<'p> {
    pub program: &'p Program,
    pub classes: ClassArena,
    pub joins: JoinTable,
    /// Top-level variables.
    pub globals: SymbolTable,
    pub passes: usize,
}

impl<'p> TypeChecker<'p> {
    /// Validates the hierarchy, builds the join table and registers every
    /// method signature.
    pub fn new(program: &'p Program) -> Result<Self, Error> {
        let start = Instant::now();
        let mut classes = build_hierarchy(&program.classes)?;
        info!("Hierarchy built in {:?}", start.elapsed());

        let start = Instant::now();
        let joins = JoinTable::build(&classes);
        info!("Join table built in {:?}", start.elapsed());

        register_methods(&mut classes, program)?;

        Ok(TypeChecker {
            program,
            classes,
            joins,
            globals: SymbolTable::new(),
            passes: 0,
        })
    }

    /// Runs passes until one changes nothing.
    pub fn infer(&mut self) -> Result<(), Error> {
        let start = Instant::now();
        while self.run_pass()? {}
        info!(
            "Inference reached a fixed point after {} passes in {:?}",
            self.passes,
            start.elapsed()
        );
        Ok(())
    }

    /// One pass over every class (by name), its methods (in declaration
    /// order) and then the top-level statements. Returns whether any entry
    /// changed.
    pub fn run_pass(&mut self) -> Result<bool, Error> {
        self.passes += 1;
        let program = self.program;

        let mut classes: Vec<&ClassDecl> = program.classes.iter().collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name));

        let mut changed = false;
        for class in classes {
            changed |= self.check_class(class)?;
        }
        changed |= self.check_program()?;

        debug!("pass {}: {}", self.passes, if changed { "changed" } else { "stable" });
        Ok(changed)
    }

    fn class_id(&self, class: &ClassDecl) -> Result<ClassId, Error> {
        self.classes.id_of(&class.name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UndefinedClass { class: class.name.clone() },
                class.span.start.clone(),
            )
        })
    }

    fn check_class(&mut self, class: &ClassDecl) -> Result<bool, Error> {
        let id = self.class_id(class)?;
        let position = class.span.start.clone();

        let mut scope = Scope::new(
            &self.classes,
            &self.joins,
            self.classes.get(id).table.clone(),
            Some(id),
            None,
        );
        let mut declared = Declared::new();

        scope.join_into("this", &class.name, &position)?;
        declared.insert(String::from("this"));
        for argument in &class.arguments {
            scope.join_into(&argument.name, &argument.param_type.name, &argument.span.start)?;
            declared.insert(argument.name.clone());
        }

        check_stmts(&mut scope, &class.statements, &mut declared)?;

        let Scope { table, mut changed, .. } = scope;
        self.classes.get_mut(id).table = table;

        for (index, method) in class.methods.iter().enumerate() {
            changed |= self.check_method(id, index, method, &declared)?;
        }

        Ok(changed)
    }

    fn check_method(
        &mut self,
        id: ClassId,
        index: usize,
        method: &MethodDecl,
        class_declared: &Declared,
    ) -> Result<bool, Error> {
        let class = self.classes.get(id);
        let label = format!("{}.{}", class.name, method.name);
        let position = method.span.start.clone();

        let mut scope = Scope::new(
            &self.classes,
            &self.joins,
            class.methods[index].table.clone(),
            Some(id),
            Some(label),
        );

        // Parameters shadow class entries of the same name.
        let parameters: BTreeSet<&str> = method.parameters.iter().map(|p| p.name.as_str()).collect();
        for (name, ty) in class.table.iter() {
            if !parameters.contains(name) {
                scope.join_into(name, ty, &position)?;
            }
        }

        let mut declared = class_declared.clone();
        for parameter in &method.parameters {
            scope.join_into(&parameter.name, &parameter.param_type.name, &parameter.span.start)?;
            declared.insert(parameter.name.clone());
        }
        if let Some(return_type) = &method.return_type {
            scope.join_into(RETURN_ENTRY, &return_type.name, &return_type.position)?;
        }

        check_stmts(&mut scope, &method.body, &mut declared)?;

        // Annotations other than `Nothing` already required a value return.
        if !has_value_return(&method.body) {
            scope.join_into(RETURN_ENTRY, NOTHING_CLASS, &position)?;
        }

        let Scope { table, mut changed, .. } = scope;
        let fields: Vec<(String, String)> = table
            .fields()
            .map(|(name, ty)| (name.to_string(), ty.to_string()))
            .collect();

        let record = self.classes.get_mut(id);
        record.methods[index].table = table;

        // Fields assigned in a method are fields of the class.
        for (name, ty) in fields {
            match record.table.join_entry(&name, &ty, &self.joins) {
                Some(true) => {
                    debug!("{}: field {} widened to {}", record.name, name, ty);
                    changed = true;
                }
                Some(false) => {}
                None => {
                    return Err(Error::new(ErrorImpl::UnknownType { type_: ty }, position));
                }
            }
        }

        Ok(changed)
    }

    fn check_program(&mut self) -> Result<bool, Error> {
        let mut scope = Scope::new(&self.classes, &self.joins, self.globals.clone(), None, None);
        let mut declared = Declared::new();

        check_stmts(&mut scope, &self.program.statements, &mut declared)?;

        let Scope { table, changed, .. } = scope;
        self.globals = table;
        Ok(changed)
    }

    pub fn into_analysis(self) -> Analysis {
        Analysis {
            classes: self.classes,
            joins: self.joins,
            globals: self.globals,
            passes: self.passes,
        }
    }
}

/// Everything inferred for a program that passed every check.
#[derive(Debug)]
pub struct Analysis {
    pub classes: ClassArena,
    pub joins: JoinTable,
    pub globals: SymbolTable,
    pub passes: usize,
}

impl Analysis {
    pub fn report(&self) -> Report {
        Report::new(&self.classes, &self.globals)
    }

    /// Inferred type of `this.field` in `class`.
    pub fn field_type(&self, class: &str, field: &str) -> Option<&str> {
        self.classes.by_name(class)?.table.get(&field_key(field))
    }

    /// Inferred return type of the first method of `class` named `method`.
    pub fn return_type(&self, class: &str, method: &str) -> Option<&str> {
        self.classes
            .by_name(class)?
            .methods
            .iter()
            .find(|record| record.name() == method)?
            .return_type()
    }

    pub fn global_type(&self, name: &str) -> Option<&str> {
        self.globals.get(name)
    }
}

/// Runs every semantic phase over `program`, stopping at the first error:
/// hierarchy validation, the join table, inference, then override validation.
pub fn type_check(program: &Program) -> Result<Analysis, Error> {
    let mut checker = TypeChecker::new(program)?;
    checker.infer()?;

    let start = Instant::now();
    validate_overrides(&mut checker.classes, &checker.joins)?;
    info!("Overrides validated in {:?}", start.elapsed());

    Ok(checker.into_analysis())
}
