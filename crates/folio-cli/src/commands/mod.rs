pub mod admin;
pub mod contact;
pub mod context;
pub mod gallery;
pub mod seed;
pub mod skills;
pub mod stats;
