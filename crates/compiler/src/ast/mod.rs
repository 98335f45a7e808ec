mod stmt;
mod value;

pub use stmt::*;
pub use value::*;
