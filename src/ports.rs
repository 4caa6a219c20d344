pub mod feed;
pub mod push;
