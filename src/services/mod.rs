pub mod discovery;
pub mod genres;
pub mod providers;
pub mod recommendations;
pub mod resolution;
