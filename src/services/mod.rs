//! Coordination services sitting between the form, the paginator and the
//! listings repository.

pub mod search;
