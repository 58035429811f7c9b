#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod assets;
pub mod transfer;

pub use assets::*;
pub use transfer::*;
