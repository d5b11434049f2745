#![cfg(test)]

pub mod common;
pub mod device_tests;
pub mod error_tests;
