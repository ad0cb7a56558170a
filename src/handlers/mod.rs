//! HTTP handlers, one module per endpoint family.

pub mod custom_page;
pub mod forms;
pub mod health;
pub mod login;
pub mod process;
