mod common;

mod account;
mod binary;
mod solution;
