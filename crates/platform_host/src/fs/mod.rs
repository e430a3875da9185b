//! Explorer filesystem contracts: virtual paths, store wire types, and store services.

pub mod path;
pub mod service;
pub mod types;
