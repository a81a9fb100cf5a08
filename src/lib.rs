//! SunDash: an interactive dashboard over the monthly sunspot number series.
//!
//! The [`data`] layer loads, filters and derives observation tables;
//! [`pipeline`] composes it per chart; [`state`] and [`app`] drive the egui
//! front-end.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod imagery;
pub mod pipeline;
pub mod state;
pub mod ui;
