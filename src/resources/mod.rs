//! ECS resources shared by the helpers.
//!
//! Overview
//! - `behaviors` – `(kind, state)` → enter/exit/update signal table
//! - `config` – INI-backed engine settings
//! - `framecallbacks` – closures run once per frame, in registration order
//! - `hudids` – generated ids for static HUD items
//! - `tileevents` – `(kind, cell)` → enter/exit signal table
//! - `tilegrid` – tile size and pixel/cell conversion
//! - `worldtime` – simulation time and delta
pub mod behaviors;
pub mod config;
pub mod framecallbacks;
pub mod hudids;
pub mod tileevents;
pub mod tilegrid;
pub mod worldtime;
