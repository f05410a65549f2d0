//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw` - Main draw functions
//! - `theme` - Color themes and presets
//! - `layout` - Sectioned grid layout and navigation
//! - `card` - Character card widget and renderers

mod draw;
pub mod card;
pub mod layout;
pub mod theme;

// Re-export main draw function
pub use draw::draw;
