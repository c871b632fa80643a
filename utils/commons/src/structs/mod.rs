use super::*;

mod asset;

pub use self::asset::*;
