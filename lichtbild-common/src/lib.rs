pub mod model;
pub mod stamp;
