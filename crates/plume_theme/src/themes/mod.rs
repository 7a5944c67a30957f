//! Built-in themes

mod plume;

pub use plume::PlumeTheme;
