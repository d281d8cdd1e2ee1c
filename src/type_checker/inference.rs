//! Statement and expression typing for the inference fixed point.
//!
//! One call to `check_stmts` analyses a statement sequence against a
//! `Scope`: the symbol table being refined plus read access to the class
//! arena and join table. The "declared" set travels separately so each
//! control-flow path can carry its own copy while every path mutates the
//! same table.

use std::collections::BTreeSet;

use log::trace;

use crate::{
    ast::{
        ast::{ClassDecl, Expr, LExpr, MethodDecl, Program, Stmt},
        statements::{AssignmentStmt, ReturnStmt, TypecaseStmt},
        types::SymbolType,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    builtins::{BOOLEAN_CLASS, INT_CLASS, NOTHING_CLASS, STRING_CLASS},
    hierarchy::{ClassArena, ClassId},
    join::JoinTable,
    symbols::{field_key, MethodKey, MethodRecord, SymbolTable, RETURN_ENTRY},
};

/// Names definitely bound on the current path.
pub type Declared = BTreeSet<String>;

pub struct Scope<'c> {
    pub classes: &'c ClassArena,
    pub joins: &'c JoinTable,
    pub table: SymbolTable,
    pub class: Option<ClassId>,
    /// `Class.method` while analysing a method body.
    pub method: Option<String>,
    /// Set when any entry of `table` moved this pass.
    pub changed: bool,
    /// Typecase names bound by an enclosing alternative.
    bindings: Vec<String>,
}

impl<'c> Scope<'c> {
    pub fn new(
        classes: &'c ClassArena,
        joins: &'c JoinTable,
        table: SymbolTable,
        class: Option<ClassId>,
        method: Option<String>,
    ) -> Self {
        Scope {
            classes,
            joins,
            table,
            class,
            method,
            changed: false,
            bindings: Vec::new(),
        }
    }

    fn label(&self) -> &str {
        match (&self.method, self.class) {
            (Some(method), _) => method,
            (None, Some(class)) => &self.classes.get(class).name,
            (None, None) => "<program>",
        }
    }

    /// Joins `ty` into `name` and records whether the entry moved.
    pub fn join_into(&mut self, name: &str, ty: &str, position: &Position) -> Result<(), Error> {
        match self.table.join_entry(name, ty, self.joins) {
            Some(true) => {
                if !self.bindings.iter().any(|binding| binding == name) {
                    trace!("{}: {} := {}", self.label(), name, self.table.get(name).unwrap_or(ty));
                    self.changed = true;
                }
                Ok(())
            }
            Some(false) => Ok(()),
            None => Err(Error::new(
                ErrorImpl::UnknownType { type_: ty.to_string() },
                position.clone(),
            )),
        }
    }
}

pub fn check_known_type(classes: &ClassArena, ty: &SymbolType) -> Result<(), Error> {
    if classes.contains(&ty.name) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorImpl::UnknownType { type_: ty.name.clone() },
            ty.get_position(),
        ))
    }
}

/// Variables, parameters and methods may not reuse a class name.
pub fn check_not_class_name(classes: &ClassArena, name: &str, role: &str, position: &Position) -> Result<(), Error> {
    if classes.contains(name) {
        Err(Error::new(
            ErrorImpl::NameConflict {
                name: name.to_string(),
                role: role.to_string(),
            },
            position.clone(),
        ))
    } else {
        Ok(())
    }
}

/// Field names assigned through `this` anywhere in `stmts`.
pub fn collect_fields(stmts: &[Stmt], fields: &mut BTreeSet<String>) {
    for stmt in stmts {
        match stmt {
            Stmt::Assignment(AssignmentStmt { target: LExpr::Field(field), .. }) if field.is_this_field() => {
                fields.insert(field.field.clone());
            }
            Stmt::If(stmt) => {
                collect_fields(&stmt.then_body, fields);
                collect_fields(&stmt.else_body, fields);
            }
            Stmt::While(stmt) => collect_fields(&stmt.body, fields),
            Stmt::Typecase(stmt) => {
                for alternative in &stmt.alternatives {
                    collect_fields(&alternative.body, fields);
                }
            }
            _ => {}
        }
    }
}

/// Whether `return <expr>` appears anywhere in `stmts`.
pub fn has_value_return(stmts: &[Stmt]) -> bool {
    stmts.iter().any(|stmt| match stmt {
        Stmt::Return(stmt) => stmt.value.is_some(),
        Stmt::If(stmt) => has_value_return(&stmt.then_body) || has_value_return(&stmt.else_body),
        Stmt::While(stmt) => has_value_return(&stmt.body),
        Stmt::Typecase(stmt) => stmt
            .alternatives
            .iter()
            .any(|alternative| has_value_return(&alternative.body)),
        _ => false,
    })
}

/// The first `return;` without a value in `stmts`.
pub fn find_bare_return(stmts: &[Stmt]) -> Option<&ReturnStmt> {
    stmts.iter().find_map(|stmt| match stmt {
        Stmt::Return(stmt) if stmt.value.is_none() => Some(stmt),
        Stmt::If(stmt) => find_bare_return(&stmt.then_body).or_else(|| find_bare_return(&stmt.else_body)),
        Stmt::While(stmt) => find_bare_return(&stmt.body),
        Stmt::Typecase(stmt) => stmt
            .alternatives
            .iter()
            .find_map(|alternative| find_bare_return(&alternative.body)),
        _ => None,
    })
}

/// Rejects a method that both returns a value and uses `return;`, and
/// one annotated with a non-`Nothing` type that never returns a value.
fn check_return_shape(class: &ClassDecl, method: &MethodDecl) -> Result<(), Error> {
    let label = format!("{}.{}", class.name, method.name);
    let value_return = has_value_return(&method.body);

    if let (true, Some(bare)) = (value_return, find_bare_return(&method.body)) {
        return Err(Error::new(ErrorImpl::MixedReturn { method: label }, bare.span.start.clone()));
    }

    match &method.return_type {
        Some(annotation) if !value_return && annotation.name != NOTHING_CLASS => Err(Error::new(
            ErrorImpl::MissingReturnValue {
                method: label,
                expected: annotation.name.clone(),
            },
            annotation.get_position(),
        )),
        _ => Ok(()),
    }
}

/// Creates a record for every user method before any body is analysed.
///
/// Also rejects the name clashes that only depend on declarations:
/// methods, parameters and constructor arguments named like a class,
/// methods named like a field of their class, duplicate signatures and
/// annotations naming unknown classes.
pub fn register_methods(classes: &mut ClassArena, program: &Program) -> Result<(), Error> {
    for class in &program.classes {
        register_class_methods(classes, class)?;
    }
    Ok(())
}

fn register_class_methods(classes: &mut ClassArena, class: &ClassDecl) -> Result<(), Error> {
    let id = classes.id_of(&class.name).ok_or_else(|| {
        Error::new(
            ErrorImpl::UndefinedClass { class: class.name.clone() },
            class.span.start.clone(),
        )
    })?;

    for argument in &class.arguments {
        check_not_class_name(classes, &argument.name, "constructor argument", &argument.span.start)?;
        check_known_type(classes, &argument.param_type)?;
    }

    let mut fields = BTreeSet::new();
    collect_fields(&class.statements, &mut fields);

    for method in &class.methods {
        let position = method.span.start.clone();
        check_not_class_name(classes, &method.name, "method", &position)?;
        if fields.contains(&method.name) {
            return Err(Error::new(
                ErrorImpl::MethodFieldConflict {
                    class: class.name.clone(),
                    name: method.name.clone(),
                },
                position,
            ));
        }

        for parameter in &method.parameters {
            check_not_class_name(classes, &parameter.name, "parameter", &parameter.span.start)?;
            check_known_type(classes, &parameter.param_type)?;
        }

        let mut table = SymbolTable::new();
        if let Some(return_type) = &method.return_type {
            check_known_type(classes, return_type)?;
            table.set(RETURN_ENTRY, &return_type.name);
        }
        check_return_shape(class, method)?;

        let key = MethodKey::new(
            &method.name,
            method
                .parameters
                .iter()
                .map(|parameter| parameter.param_type.name.clone())
                .collect(),
        );
        if classes.get(id).method_index(&key).is_some() {
            return Err(Error::new(
                ErrorImpl::MethodAlreadyDeclared {
                    class: class.name.clone(),
                    method: method.name.clone(),
                },
                position,
            ));
        }

        classes.get_mut(id).methods.push(MethodRecord {
            key,
            parameter_names: method.parameters.iter().map(|parameter| parameter.name.clone()).collect(),
            table,
        });
    }

    Ok(())
}

pub fn check_stmts(scope: &mut Scope, stmts: &[Stmt], declared: &mut Declared) -> Result<(), Error> {
    for stmt in stmts {
        check_stmt(scope, stmt, declared)?;
    }
    Ok(())
}

pub fn check_stmt(scope: &mut Scope, stmt: &Stmt, declared: &mut Declared) -> Result<(), Error> {
    match stmt {
        Stmt::Assignment(assignment) => check_assignment(scope, assignment, declared),
        Stmt::Expression(expression) => type_of_expr(scope, &expression.expression, declared).map(|_| ()),
        Stmt::Return(ret) => check_return(scope, ret, declared),
        Stmt::If(stmt) => {
            type_of_expr(scope, &stmt.condition, declared)?;

            // Both branches refine the same table, then-branch first.
            let mut then_declared = declared.clone();
            check_stmts(scope, &stmt.then_body, &mut then_declared)?;
            let mut else_declared = declared.clone();
            check_stmts(scope, &stmt.else_body, &mut else_declared)?;

            *declared = then_declared.intersection(&else_declared).cloned().collect();
            Ok(())
        }
        Stmt::While(stmt) => {
            type_of_expr(scope, &stmt.condition, declared)?;

            // The body may never run.
            let mut body_declared = declared.clone();
            check_stmts(scope, &stmt.body, &mut body_declared)
        }
        Stmt::Typecase(stmt) => check_typecase(scope, stmt, declared),
    }
}

fn check_assignment(scope: &mut Scope, assignment: &AssignmentStmt, declared: &mut Declared) -> Result<(), Error> {
    let value_type = type_of_expr(scope, &assignment.value, declared)?;
    if let Some(explicit) = &assignment.explicit_type {
        check_known_type(scope.classes, explicit)?;
    }

    let position = &assignment.target.get_span().start;
    let key = match &assignment.target {
        LExpr::Variable(symbol) => {
            check_not_class_name(scope.classes, &symbol.value, "variable", position)?;
            symbol.value.clone()
        }
        LExpr::Field(field) if field.is_this_field() => {
            check_not_class_name(scope.classes, &field.field, "field", position)?;
            type_of_expr(scope, &field.object, declared)?;
            field_key(&field.field)
        }
        LExpr::Field(field) => {
            // Fields of other objects are checked but not tracked.
            type_of_expr(scope, &field.object, declared)?;
            return Ok(());
        }
    };

    if let Some(explicit) = &assignment.explicit_type {
        scope.join_into(&key, &explicit.name, position)?;
    }
    if let Some(ty) = value_type {
        scope.join_into(&key, &ty, position)?;
    }

    declared.insert(key);
    Ok(())
}

fn check_return(scope: &mut Scope, ret: &ReturnStmt, declared: &Declared) -> Result<(), Error> {
    let position = ret.span.start.clone();
    let method = match &scope.method {
        Some(method) => method.clone(),
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: String::from("return"),
                    message: String::from("`return` is only allowed inside a method"),
                },
                position,
            ));
        }
    };
    let value = match &ret.value {
        Some(value) => value,
        // Mixing with value returns is rejected when the method is registered.
        None => return scope.join_into(RETURN_ENTRY, NOTHING_CLASS, &position),
    };

    let ty = match type_of_expr(scope, value, declared)? {
        Some(ty) => ty,
        None => return Ok(()),
    };
    let current = scope.table.get(RETURN_ENTRY).map(str::to_string);

    scope.join_into(RETURN_ENTRY, &ty, &position).map_err(|_| {
        Error::new(
            ErrorImpl::ReturnTypeConflict {
                method,
                expected: current.unwrap_or_default(),
                received: ty.clone(),
            },
            position.clone(),
        )
    })
}

fn check_typecase(scope: &mut Scope, stmt: &TypecaseStmt, declared: &Declared) -> Result<(), Error> {
    type_of_expr(scope, &stmt.subject, declared)?;

    for alternative in &stmt.alternatives {
        check_known_type(scope.classes, &alternative.alt_type)?;
        check_not_class_name(scope.classes, &alternative.name, "variable", &alternative.span.start)?;

        // The binding replaces the entry while this alternative runs and
        // never counts as a change.
        let previous = scope.table.get(&alternative.name).map(str::to_string);
        scope.table.set(&alternative.name, &alternative.alt_type.name);
        scope.bindings.push(alternative.name.clone());

        let mut alternative_declared = declared.clone();
        alternative_declared.insert(alternative.name.clone());
        let result = check_stmts(scope, &alternative.body, &mut alternative_declared);

        scope.bindings.pop();
        scope.table.restore(&alternative.name, previous);
        result?;
    }

    Ok(())
}

fn not_declared(variable: &str, position: &Position) -> Error {
    Error::new(
        ErrorImpl::VariableNotDeclared { variable: variable.to_string() },
        position.clone(),
    )
}

/// The current type of `expr`, `None` while it is still unknown.
///
/// Every variable read must be in `declared`, whether or not its type is known.
pub fn type_of_expr(scope: &Scope, expr: &Expr, declared: &Declared) -> Result<Option<String>, Error> {
    match expr {
        Expr::Number(_) => Ok(Some(INT_CLASS.to_string())),
        Expr::String(_) => Ok(Some(STRING_CLASS.to_string())),
        Expr::Boolean(_) => Ok(Some(BOOLEAN_CLASS.to_string())),
        Expr::Nothing(_) => Ok(Some(NOTHING_CLASS.to_string())),
        Expr::Symbol(symbol) => {
            if !declared.contains(&symbol.value) {
                return Err(not_declared(&symbol.value, &symbol.span.start));
            }
            Ok(scope.table.get(&symbol.value).map(str::to_string))
        }
        Expr::Field(field) => {
            if field.is_this_field() {
                type_of_expr(scope, &field.object, declared)?;
                let key = field_key(&field.field);
                if !declared.contains(&key) {
                    return Err(not_declared(&key, &field.span.start));
                }
                return Ok(scope.table.get(&key).map(str::to_string));
            }

            let receiver = type_of_expr(scope, &field.object, declared)?;
            let key = field_key(&field.field);
            Ok(receiver
                .and_then(|class| scope.classes.id_of(&class))
                .and_then(|id| scope.classes.find_field(id, &key))
                .map(str::to_string))
        }
        Expr::Call(call) => {
            let receiver = type_of_expr(scope, &call.receiver, declared)?;

            let mut argument_types = Vec::with_capacity(call.arguments.len());
            let mut unknown = false;
            for argument in &call.arguments {
                match type_of_expr(scope, argument, declared)? {
                    Some(ty) => argument_types.push(ty),
                    None => unknown = true,
                }
            }

            let receiver = match receiver {
                Some(receiver) if !unknown => receiver,
                // Decided on a later pass.
                _ => return Ok(None),
            };

            let id = scope.classes.id_of(&receiver).ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnknownType { type_: receiver.clone() },
                    call.span.start.clone(),
                )
            })?;

            match scope.classes.find_method(id, &call.method, &argument_types) {
                Some(method) => Ok(method.return_type().map(str::to_string)),
                None => Err(Error::new(
                    ErrorImpl::MethodNotFound {
                        class: receiver,
                        method: call.method.clone(),
                        arguments: argument_types.join(", "),
                    },
                    call.span.start.clone(),
                )),
            }
        }
        Expr::New(new) => {
            for argument in &new.arguments {
                type_of_expr(scope, argument, declared)?;
            }
            check_known_type(scope.classes, &new.class)?;
            Ok(Some(new.class.name.clone()))
        }
        Expr::Logical(logical) => {
            type_of_expr(scope, &logical.left, declared)?;
            type_of_expr(scope, &logical.right, declared)?;
            Ok(Some(BOOLEAN_CLASS.to_string()))
        }
        Expr::Not(not) => {
            type_of_expr(scope, &not.operand, declared)?;
            Ok(Some(BOOLEAN_CLASS.to_string()))
        }
    }
}
