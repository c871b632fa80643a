//! It exposes the structs, types, errors and host extensions shared by the
//! asset listing contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{asset::*, constants::*, errors::*, structs::*, types::*};
use concordium_cis2::*;
use concordium_std::*;

pub mod test;

mod asset;
mod constants;
mod errors;
mod structs;
mod types;
