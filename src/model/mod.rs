// File: ./src/model/mod.rs
pub mod course;
pub mod display;
pub mod item;
pub mod timestamp;

pub use course::Course;
pub use item::{Category, Item};
