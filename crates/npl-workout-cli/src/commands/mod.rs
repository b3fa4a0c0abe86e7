pub mod dividend;
pub mod fees;
pub mod lead_time;
pub mod rights;
pub mod xnpv;
