pub mod certificate;
pub mod initiative;
pub mod participation;
pub mod statistics;
pub mod user;
