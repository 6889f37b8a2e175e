//! UI module for the viewer.

mod chart;
mod footer;
mod header;
mod home;
mod layout;

pub use layout::draw_ui;
