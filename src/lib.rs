// Library entry exposing the decode-table tooling modules.
pub mod cli;
pub mod clocks;
pub mod error;
pub mod generator;
pub mod mask;
pub mod table;
pub mod which;
