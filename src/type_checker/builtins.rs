//! Built-in classes and the method signatures they carry.

use std::collections::HashMap;

use lazy_static::lazy_static;

pub const ROOT_CLASS: &str = "Obj";
pub const NOTHING_CLASS: &str = "Nothing";
pub const STRING_CLASS: &str = "String";
pub const INT_CLASS: &str = "Int";
pub const BOOLEAN_CLASS: &str = "Boolean";

/// Every built-in class, root first.
pub const BUILTIN_CLASSES: [&str; 5] = [ROOT_CLASS, NOTHING_CLASS, STRING_CLASS, INT_CLASS, BOOLEAN_CLASS];

/// `name(parameter types) -> return type`
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinMethod {
    pub name: &'static str,
    pub parameters: Vec<&'static str>,
    pub return_type: &'static str,
}

impl BuiltinMethod {
    fn new(name: &'static str, parameters: Vec<&'static str>, return_type: &'static str) -> Self {
        BuiltinMethod {
            name,
            parameters,
            return_type,
        }
    }
}

fn common_methods(equals_with: Option<&'static str>) -> Vec<BuiltinMethod> {
    let mut methods = vec![
        BuiltinMethod::new("STR", vec![], STRING_CLASS),
        BuiltinMethod::new("PRINT", vec![], NOTHING_CLASS),
    ];
    if let Some(other) = equals_with {
        methods.push(BuiltinMethod::new("EQUALS", vec![other], BOOLEAN_CLASS));
    }
    methods
}

fn comparisons(operand: &'static str) -> Vec<BuiltinMethod> {
    ["LESS", "ATMOST", "ATLEAST", "MORE"]
        .into_iter()
        .map(|name| BuiltinMethod::new(name, vec![operand], BOOLEAN_CLASS))
        .collect()
}

lazy_static! {
    pub static ref BUILTIN_METHODS: HashMap<&'static str, Vec<BuiltinMethod>> = {
        let mut methods = HashMap::new();

        methods.insert(ROOT_CLASS, common_methods(Some(ROOT_CLASS)));
        methods.insert(NOTHING_CLASS, common_methods(None));
        methods.insert(BOOLEAN_CLASS, common_methods(Some(BOOLEAN_CLASS)));

        let mut string = common_methods(Some(STRING_CLASS));
        string.push(BuiltinMethod::new("PLUS", vec![STRING_CLASS], STRING_CLASS));
        string.extend(comparisons(STRING_CLASS));
        methods.insert(STRING_CLASS, string);

        let mut int = common_methods(Some(INT_CLASS));
        for name in ["PLUS", "MINUS", "TIMES", "DIVIDE"] {
            int.push(BuiltinMethod::new(name, vec![INT_CLASS], INT_CLASS));
        }
        int.extend(comparisons(INT_CLASS));
        methods.insert(INT_CLASS, int);

        methods
    };
}

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_CLASSES.contains(&name)
}
