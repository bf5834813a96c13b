pub mod help;
pub mod language;
pub mod prefix;
