//! Deserializers for custom behavior and backward compatibility.

mod string_list;

pub use string_list::*;
