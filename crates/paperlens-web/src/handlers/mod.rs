pub mod index;
pub mod reset;
pub mod state;
pub mod upload;
