pub mod controller;
pub mod dataset;
pub mod fetch;
pub mod filter;
pub mod output;
pub mod scales;
pub mod traffic;
