pub mod magic;
pub mod io;          pub use io::*;
