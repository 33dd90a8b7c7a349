/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod address;
pub mod cidr_block;
pub mod cidr_set;
pub mod client;
pub mod config;
pub mod datetime;
pub mod errors;
pub mod json;
pub mod pipeline;
