//! Serialize values into byte streams and read them back, with the stream
//! bookkeeping (capability checks, positions, error translation) handled in
//! one place.
//!
//! The encoding itself belongs to a [`Formatter`]; the default is the
//! [`BinaryFormatter`].

pub mod core;    pub use crate::core::*;
pub mod io;      pub use crate::io::*;
pub mod helper;  pub use crate::helper::*;
