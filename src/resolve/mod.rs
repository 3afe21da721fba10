// Author: Dustin Pilgrim
// License: MIT

//! Semantic resolution: four in-place passes over a parsed document, run in
//! the fixed order import merge, inheritance, platform keys, variables.

pub mod imports;
pub mod inherit;
pub mod merge;
pub mod platform;
pub mod vars;

#[cfg(test)]
mod tests;
