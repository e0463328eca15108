//! # Flags
//!
//! Turns raw command line values into the per command input model.
//!
//! Every user settable attribute is carried as a [Field], which keeps
//! "flag not given" apart from "flag given with the zero value".
//! The decode helpers parse a single raw value per declared type and
//! report failures naming the offending flag or argument.

mod decode;
mod error;
mod field;

pub use decode::*;
pub use error::Error;
pub use field::Field;

pub type Result<T> = ::core::result::Result<T, Error>;
