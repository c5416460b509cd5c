pub mod domain;
pub mod query;

#[cfg(feature = "client")]
pub mod dto;
#[cfg(feature = "client")]
pub mod forms;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod pagination;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod views;
