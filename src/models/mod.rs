pub mod summary;
pub mod transcript;
pub mod turn;
