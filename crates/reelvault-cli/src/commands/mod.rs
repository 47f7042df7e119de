pub mod clear;
pub mod config;
pub mod context;
pub mod detail;
pub mod lists;
pub mod login;
pub mod prompts;
pub mod recommend;
pub mod render;
pub mod search;
pub mod track;
