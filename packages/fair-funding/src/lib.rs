#![allow(non_snake_case)]
#![allow(unused_parens)]
#![allow(unused_doc_comments)]
#![allow(non_camel_case_types)]
pub mod alchemist;
pub mod auction_house;
pub mod helpers;
pub mod migrator;
pub mod nft;
pub mod types;
pub mod vault;
