pub mod fields;
pub mod notification;
pub mod prediction;
pub mod presets;
pub mod session;
