pub mod clusters;
pub mod console;
