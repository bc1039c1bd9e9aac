pub mod account;
pub mod binary;
pub mod solution;
