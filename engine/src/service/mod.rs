pub mod adapter;
pub mod builder;
pub mod factory;
#[cfg(test)]
pub mod stub;
pub mod traits;
