//! A listing contract for a single fungible CIS-2 asset.
//!
//! # Description
//! The creator of an instance lists one asset at a unit price. The contract
//! keeps custody of the listed units, so before it can hold them it has to be
//! registered with the asset ledger contract hosting the asset. Registration
//! is a zero unit transfer to the registering address, funded by a reserve of
//! `MIN_BALANCE + ASSET_OPT_IN_MIN_BALANCE` paid to the contract.
//!
//! Only the creator may update the price or register the contract itself.
//! Any address may ask the contract to register it so it can receive the
//! asset later.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::{events::*, helper::*, structs::*};
use commons::*;
use concordium_cis2::*;
use concordium_std::*;
use marker::PhantomData;

mod contract;
mod events;
mod helper;
mod impls;
mod structs;
