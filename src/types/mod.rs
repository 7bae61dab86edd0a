pub mod api_types;
pub mod operation;
pub mod token;

pub use api_types::*;
pub use operation::*;
pub use token::*;
