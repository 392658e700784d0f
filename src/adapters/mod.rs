// Adapters layer: concrete implementations of the domain ports.

pub mod domain_list;
pub mod inwx;
