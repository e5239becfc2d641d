pub mod boundary;
pub mod candidate;
pub mod errors;
pub mod objective;

pub use boundary::*;
pub use candidate::*;
pub use errors::*;
pub use objective::*;
