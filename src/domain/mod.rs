// Domain layer - Pure models with no I/O
pub mod page;
pub mod reading;
pub mod series;
pub mod station;
