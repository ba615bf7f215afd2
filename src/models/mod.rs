pub mod alert_level;
pub mod family;
pub mod lot;
pub mod movement;
pub mod product;
