pub use layered_settings_types::prelude::*;

// vim: ts=4
