//! Loading data trees from files and stdin.

pub mod loader;

pub use loader::{load_tree_file, load_tree_from_stdin, TreeFormat};
