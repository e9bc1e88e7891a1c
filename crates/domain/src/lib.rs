#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod action;
mod config;
mod device;
mod error;
mod exercise;
mod id;
mod name;
mod service;
mod statistics;
mod training;
mod user;
mod workspace;

pub use config::*;
pub use device::*;
pub use error::*;
pub use exercise::*;
pub use id::*;
pub use name::*;
pub use service::*;
pub use statistics::*;
pub use training::*;
pub use user::*;
pub use workspace::*;
