//! Read models handed to the result list and the views.

pub mod search;
