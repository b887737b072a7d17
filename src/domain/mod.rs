pub mod error;

// Creator video analytics domain
pub mod video;
