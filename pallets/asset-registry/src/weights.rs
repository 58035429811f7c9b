#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn register_token_pair() -> Weight;
	fn toggle_conversion() -> Weight;
	fn deregister_token_pair() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn register_token_pair() -> Weight {
		Weight::from_parts(35_000_000, 3500)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn toggle_conversion() -> Weight {
		Weight::from_parts(15_000_000, 2000)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn deregister_token_pair() -> Weight {
		Weight::from_parts(20_000_000, 2500)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(3))
	}
}

impl WeightInfo for () {
	fn register_token_pair() -> Weight {
		Weight::from_parts(35_000_000, 3500)
	}
	fn toggle_conversion() -> Weight {
		Weight::from_parts(15_000_000, 2000)
	}
	fn deregister_token_pair() -> Weight {
		Weight::from_parts(20_000_000, 2500)
	}
}
