mod style_toggle;

pub use style_toggle::StyleToggle;
