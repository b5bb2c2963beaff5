//! Course discovery: the selection wizard, its eligibility and search clients, and a reference
//! backend that serves both exchanges from CSV catalog data.

pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod telemetry;
pub mod workflows;
