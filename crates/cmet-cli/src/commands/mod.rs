pub mod collect;
pub mod engines;
