pub mod binary;      pub use binary::*;
