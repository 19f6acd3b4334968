mod json_catalogue;

pub use json_catalogue::{BUILTIN_CATALOGUE, load_catalogue_file, parse_catalogue};
