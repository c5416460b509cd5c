//! Domain values shared by the search form, the query codec and the API layer.

pub mod filter;
pub mod school;
pub mod types;
