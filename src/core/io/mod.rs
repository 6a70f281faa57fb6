pub mod binarizable; pub use binarizable::*;
pub mod stream;      pub use stream::*;
