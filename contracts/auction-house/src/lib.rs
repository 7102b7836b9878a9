#![allow(non_snake_case)]
#![allow(unused_parens)]
#![allow(unused_doc_comments)]
#![allow(non_camel_case_types)]
pub mod auction;
pub mod contract;
mod error;
pub mod helpers;
pub mod state;

pub use crate::error::ContractError;
