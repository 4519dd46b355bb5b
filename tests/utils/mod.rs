#![allow(dead_code)]

pub mod db;
pub mod factories;
pub mod helpers;
pub mod memory;
