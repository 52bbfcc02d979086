//! UI components.

pub mod force_menu;
