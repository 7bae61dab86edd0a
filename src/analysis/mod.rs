pub mod numeric;
pub mod price;
pub mod risk;

pub use risk::classify;
