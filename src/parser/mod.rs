pub mod primitive_parser;
pub mod staff;
pub mod tab_parser;
pub mod tuning;
