pub mod style_panel;

pub use style_panel::show_style_panel;
