//! Haraz-5 well-log explorer.
//!
//! Loads a clustered log table, filters it by depth interval and cluster,
//! summarizes Porosity / Vshale per cluster and flags hydrocarbon zones.
//! The `data` module is the whole pipeline; `ui`, `app` and `state` wrap it
//! in an egui window.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
