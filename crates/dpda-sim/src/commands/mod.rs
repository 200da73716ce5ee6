pub mod all;
pub mod common;
pub mod distribution;
pub mod proposals;
pub mod ranks;
pub mod trial;
