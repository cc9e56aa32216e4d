pub mod clear;
pub mod copy;

pub use clear::{clear_dir, remove_file};
pub use copy::{CopyOptions, copy_file};
