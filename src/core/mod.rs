pub mod alerts;
pub mod fefo;
pub mod log;
pub mod lookup;
pub mod movement;
pub mod view;
