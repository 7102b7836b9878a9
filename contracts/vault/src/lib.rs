#![allow(non_snake_case)]
#![allow(unused_parens)]
#![allow(unused_doc_comments)]
#![allow(non_camel_case_types)]
#![allow(clippy::inconsistent_digit_grouping)]
pub mod collateral;
pub mod contract;
mod error;
pub mod helpers;
pub mod positions;
pub mod query;
pub mod reply;
pub mod state;

pub use crate::error::ContractError;

#[cfg(test)]
#[allow(unused_variables)]
mod testing;
