//! Callback programs
//!
//! A function resource holds the source of a small program plus the state it
//! runs against: named numbers, named strings and a flat memory of numbers.
//! Compiling and running the program is the job of a [`ProgramRuntime`]
//! supplied by the host.

use super::context::Context;
use crate::resource::{Resource, ResourceError, ResourceKind};
use std::collections::HashMap;

/// Executes program source against a [`ProgramState`]
pub trait ProgramRuntime {
    /// Run `code` once. The error is a message for the script caller.
    fn execute(&mut self, code: &str, state: &mut ProgramState) -> Result<(), String>;
}

/// Variables and memory of a callback program
#[derive(Debug, Clone, Default)]
pub struct ProgramState {
    numbers: HashMap<String, f64>,
    strings: HashMap<String, String>,
    memory: Vec<f64>,
}

/// Variable names: a letter or `_` followed by letters, digits, `_` or `.`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// String variables may be written with their `#` sigil
fn string_name(name: &str) -> &str {
    name.strip_prefix('#').unwrap_or(name)
}

impl ProgramState {
    /// State with `memory_cells` zeroed memory cells
    pub fn new(memory_cells: usize) -> Self {
        Self {
            numbers: HashMap::new(),
            strings: HashMap::new(),
            memory: vec![0.0; memory_cells],
        }
    }

    /// Named number
    pub fn number(&self, name: &str) -> Option<f64> {
        self.numbers.get(name).copied()
    }

    /// Set a named number. Returns `false` for an invalid name.
    pub fn set_number(&mut self, name: &str, value: f64) -> bool {
        if !is_identifier(name) {
            return false;
        }
        self.numbers.insert(name.to_owned(), value);
        true
    }

    /// Named string
    pub fn string(&self, name: &str) -> Option<&str> {
        self.strings.get(string_name(name)).map(String::as_str)
    }

    /// Set a named string. Returns `false` for an invalid name.
    pub fn set_string(&mut self, name: &str, value: &str) -> bool {
        let name = string_name(name);
        if !is_identifier(name) {
            return false;
        }
        self.strings.insert(name.to_owned(), value.to_owned());
        true
    }

    /// Program memory
    pub fn memory(&self) -> &[f64] {
        &self.memory
    }

    /// Mutable program memory
    pub fn memory_mut(&mut self) -> &mut [f64] {
        &mut self.memory
    }

    /// Memory range of `len` cells starting at the address held by `name`
    fn range(&self, name: &str, len: usize) -> Option<std::ops::Range<usize>> {
        let address = self.number(name)?;
        if !address.is_finite() || address < 0.0 {
            return None;
        }
        // Addresses are truncated like every other memory index
        let start = address as usize;
        let end = start.checked_add(len)?;
        (end <= self.memory.len()).then_some(start..end)
    }
}

/// Callback program resource
#[derive(Debug, Clone)]
pub struct Function {
    code: String,
    state: ProgramState,
}

impl Function {
    /// Wrap program source with a fresh state
    pub fn new(code: &str, memory_cells: usize) -> Self {
        Self {
            code: code.to_owned(),
            state: ProgramState::new(memory_cells),
        }
    }

    /// Program source
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Program state
    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    /// Run the program once
    pub fn execute(&mut self, runtime: &mut dyn ProgramRuntime) -> Result<(), ResourceError> {
        runtime
            .execute(&self.code, &mut self.state)
            .map_err(|message| ResourceError::Value(format!("program execution failed: {message}")))
    }

    /// Read a named number
    pub fn get_value(&self, name: &str) -> Result<f64, ResourceError> {
        self.state
            .number(name)
            .ok_or_else(|| ResourceError::Value("could not read number value".to_string()))
    }

    /// Write a named number
    pub fn set_value(&mut self, name: &str, value: f64) -> Result<(), ResourceError> {
        if self.state.set_number(name, value) {
            Ok(())
        } else {
            Err(ResourceError::Value("could not write number value".to_string()))
        }
    }

    /// Read a named string
    pub fn get_string(&self, name: &str) -> Result<&str, ResourceError> {
        self.state
            .string(name)
            .ok_or_else(|| ResourceError::Value("could not read string value".to_string()))
    }

    /// Write a named string
    pub fn set_string(&mut self, name: &str, value: &str) -> Result<(), ResourceError> {
        if self.state.set_string(name, value) {
            Ok(())
        } else {
            Err(ResourceError::Value("could not write string value".to_string()))
        }
    }

    /// Copy memory starting at the address stored in `name` into `out`
    pub fn get_array(&self, name: &str, out: &mut [f64]) -> Result<(), ResourceError> {
        let range = self
            .state
            .range(name, out.len())
            .ok_or_else(|| ResourceError::Value("could not read array values".to_string()))?;
        out.copy_from_slice(&self.state.memory[range]);
        Ok(())
    }

    /// Copy `values` into memory starting at the address stored in `name`
    pub fn set_array(&mut self, name: &str, values: &[f64]) -> Result<(), ResourceError> {
        let range = self
            .state
            .range(name, values.len())
            .ok_or_else(|| ResourceError::Value("could not write array values".to_string()))?;
        self.state.memory[range].copy_from_slice(values);
        Ok(())
    }
}

impl Resource for Function {
    fn attachable(&self, owner: &dyn Resource) -> bool {
        owner.as_any().is::<Context>()
    }
}

impl ResourceKind for Function {
    const TYPE_NAME: &'static str = "UI_Function";
}
