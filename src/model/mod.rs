pub mod feature;
pub mod groomed;
