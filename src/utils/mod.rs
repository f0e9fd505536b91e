pub mod colors;
pub mod fs;
pub mod path;
pub mod table;
pub mod time;
