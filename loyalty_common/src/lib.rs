mod cents;

pub mod helpers;
pub mod ops;
mod secret;

pub use cents::{Cents, CentsConversionError, CURRENCY_MINOR_UNITS};
pub use secret::Secret;
