//! Plume Widget Library
//!
//! Concrete widgets for the styled widget tree. Each widget only supplies
//! what is specific to its content (measurement, painting, input); box
//! model, background, border and layout come from [`plume_layout`].
//!
//! Every widget exposes a `default_style()` built from theme tokens and an
//! `insert` constructor that layers caller styles on top of it.

pub mod button;
pub mod container;
pub mod icon;
pub mod panel;
pub mod tabs;
pub mod text;

pub use button::Button;
pub use container::Container;
pub use icon::Icon;
pub use panel::Panel;
pub use tabs::{Tab, TabContainer};
pub use text::Text;
