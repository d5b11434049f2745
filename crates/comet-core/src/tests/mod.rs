// Cross-module test suites
#[cfg(test)]
pub mod integration;
