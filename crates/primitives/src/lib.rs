//! Core types for annotated object graphs: values, objects, symbols and
//! property slots.

/// Errors raised by callables and object mutation.
pub mod error;
/// Reference-identity object handles.
pub mod object;
/// Property keys, kinds and the own-entries capability.
pub mod property;
/// Unique symbol keys.
pub mod symbol;
/// Dynamically-typed values.
pub mod value;

pub use error::{CallError, ObjectError};
pub use object::{Callable, Object, ObjectId, Slot, WeakObject};
pub use property::{Entry, OwnEntries, PropertyKey, PropertyKind};
pub use symbol::Symbol;
pub use value::{Record, Value};
