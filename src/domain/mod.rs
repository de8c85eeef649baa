mod amount;
mod category;
mod date;
mod expense;

pub use amount::*;
pub use category::*;
pub use date::*;
pub use expense::*;
