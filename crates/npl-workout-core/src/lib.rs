pub mod error;
pub mod types;

#[cfg(feature = "fees")]
pub mod fees;

#[cfg(feature = "lead_time")]
pub mod lead_time;

#[cfg(feature = "senior_rights")]
pub mod senior_rights;

#[cfg(feature = "dividend")]
pub mod dividend;

#[cfg(feature = "xnpv")]
pub mod xnpv;

#[cfg(feature = "recovery")]
pub mod recovery;

pub use error::WorkoutError;
pub use types::*;

/// Standard result type for all workout calculations
pub type WorkoutResult<T> = Result<T, WorkoutError>;
