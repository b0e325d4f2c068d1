//! Variable environment of a program.
//!
//! Programs have a single flat scope: every variable is declared up front
//! with a type, starts at that type's zero value and lives as long as the
//! program. Only assignment and `foreach` binding change a value.

use rustc_hash::FxHashMap;

use npl_ir::{Name, Type, VariableDecl};

use crate::Value;

/// Error returned by [`Environment::assign`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// No variable with this name was declared.
    Undefined,
    /// The value's type differs from the declaration.
    TypeMismatch { expected: Type },
}

#[derive(Copy, Clone, Debug)]
struct Slot {
    ty: Type,
    value: Value,
}

/// Typed variable storage keyed by interned name.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    slots: FxHashMap<Name, Slot>,
}

impl Environment {
    /// Environment holding every declaration at its zero value.
    ///
    /// A repeated declaration keeps the first type.
    pub fn new(decls: &[VariableDecl]) -> Self {
        let mut slots = FxHashMap::default();
        for decl in decls {
            slots.entry(decl.name).or_insert(Slot {
                ty: decl.ty,
                value: Value::zero(decl.ty),
            });
        }
        Environment { slots }
    }

    /// Current value of a variable.
    #[inline]
    pub fn get(&self, name: Name) -> Option<Value> {
        self.slots.get(&name).map(|slot| slot.value)
    }

    /// Declared type of a variable.
    pub fn declared_type(&self, name: Name) -> Option<Type> {
        self.slots.get(&name).map(|slot| slot.ty)
    }

    /// Store a value, checking it against the declared type.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        let slot = self.slots.get_mut(&name).ok_or(AssignError::Undefined)?;
        if value.type_of() != slot.ty {
            return Err(AssignError::TypeMismatch { expected: slot.ty });
        }
        slot.value = value;
        Ok(())
    }

    /// Put every variable back to its zero value.
    pub fn reset(&mut self) {
        for slot in self.slots.values_mut() {
            slot.value = Value::zero(slot.ty);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
