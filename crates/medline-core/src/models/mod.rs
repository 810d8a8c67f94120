pub mod clinic;
pub mod intake;
