pub mod date;
pub mod path;
pub mod text;
pub mod value;
