//! Resolved symbol tables in a dumpable shape.

use std::fmt::Display;

use serde::Serialize;

use super::{
    hierarchy::ClassArena,
    symbols::{SymbolTable, FIELD_PREFIX, RETURN_ENTRY},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// User classes, by name.
    pub classes: Vec<ClassReport>,
    /// Top-level variables.
    pub program: Vec<SymbolReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport {
    pub name: String,
    pub superclass: String,
    pub fields: Vec<SymbolReport>,
    /// In declaration order.
    pub methods: Vec<MethodReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodReport {
    pub name: String,
    pub parameters: Vec<SymbolReport>,
    pub return_type: Option<String>,
    /// Every local entry except the return slot.
    pub symbols: Vec<SymbolReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolReport {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl SymbolReport {
    fn new(name: &str, ty: &str) -> Self {
        SymbolReport {
            name: name.to_string(),
            ty: ty.to_string(),
        }
    }
}

fn locals(table: &SymbolTable) -> Vec<SymbolReport> {
    table
        .iter()
        .filter(|(name, _)| *name != RETURN_ENTRY)
        .map(|(name, ty)| SymbolReport::new(name, ty))
        .collect()
}

impl Report {
    pub fn new(classes: &ClassArena, globals: &SymbolTable) -> Self {
        let classes = classes
            .user_ids()
            .into_iter()
            .map(|id| {
                let class = classes.get(id);
                ClassReport {
                    name: class.name.clone(),
                    superclass: class
                        .superclass
                        .map(|super_id| classes.get(super_id).name.clone())
                        .unwrap_or_default(),
                    fields: class
                        .table
                        .fields()
                        .map(|(name, ty)| SymbolReport::new(&name[FIELD_PREFIX.len()..], ty))
                        .collect(),
                    methods: class
                        .methods
                        .iter()
                        .map(|method| MethodReport {
                            name: method.name().to_string(),
                            parameters: method
                                .parameters()
                                .map(|(name, ty)| SymbolReport::new(name, ty))
                                .collect(),
                            return_type: method.return_type().map(str::to_string),
                            symbols: locals(&method.table),
                        })
                        .collect(),
                }
            })
            .collect();

        Report {
            classes,
            program: locals(globals),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for class in &self.classes {
            writeln!(f, "class {} extends {}", class.name, class.superclass)?;
            writeln!(f, "  fields")?;
            for field in &class.fields {
                writeln!(f, "    {}: {}", field.name, field.ty)?;
            }

            for method in &class.methods {
                let parameters: Vec<String> = method
                    .parameters
                    .iter()
                    .map(|parameter| format!("{}: {}", parameter.name, parameter.ty))
                    .collect();
                writeln!(
                    f,
                    "  method {}({}) -> {}",
                    method.name,
                    parameters.join(", "),
                    method.return_type.as_deref().unwrap_or("?")
                )?;
                for symbol in &method.symbols {
                    writeln!(f, "    {}: {}", symbol.name, symbol.ty)?;
                }
            }
        }

        writeln!(f, "program")?;
        for symbol in &self.program {
            writeln!(f, "  {}: {}", symbol.name, symbol.ty)?;
        }

        Ok(())
    }
}
