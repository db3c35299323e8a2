pub mod base;
pub mod group;
pub mod macros;
pub mod marker;
pub mod manager;
pub mod tile;
pub mod vector;
