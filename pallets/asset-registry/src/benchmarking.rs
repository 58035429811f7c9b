use crate::*;
use alloc::vec::Vec;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;
use frame::deps::sp_runtime::traits::StaticLookup;
use primitives::assets::TokenOwner;

const BENCH_ASSET: u32 = 0x0B0B;

fn test_denom(index: u8) -> Vec<u8> {
  let mut denom = b"ubench".to_vec();
  denom.push(b'a' + index);
  denom
}

fn create_asset<T: Config>()
where
  <T as polkadot_sdk::pallet_assets::Config>::AssetIdParameter: From<u32>,
  <T as polkadot_sdk::pallet_assets::Config>::Balance: From<u32>,
{
  let owner: T::AccountId = whitelisted_caller();
  polkadot_sdk::pallet_assets::Pallet::<T>::force_create(
    RawOrigin::Root.into(),
    BENCH_ASSET.into(),
    T::Lookup::unlookup(owner),
    true,
    1u32.into(),
  )
  .expect("asset creation failed");
}

#[benchmarks(
  where
    <T as polkadot_sdk::pallet_assets::Config>::AssetIdParameter: From<u32>,
    <T as polkadot_sdk::pallet_assets::Config>::Balance: From<u32>,
)]
mod benches {
  use super::*;

  #[benchmark]
  fn register_token_pair() {
    create_asset::<T>();

    #[extrinsic_call]
    register_token_pair(RawOrigin::Root, test_denom(0), BENCH_ASSET, TokenOwner::External);
  }

  #[benchmark]
  fn toggle_conversion() {
    create_asset::<T>();
    pallet::Pallet::<T>::register_token_pair(
      RawOrigin::Root.into(),
      test_denom(1),
      BENCH_ASSET,
      TokenOwner::External,
    )
    .expect("pre-registration failed");

    #[extrinsic_call]
    toggle_conversion(RawOrigin::Root, test_denom(1));
  }

  #[benchmark]
  fn deregister_token_pair() {
    create_asset::<T>();
    pallet::Pallet::<T>::register_token_pair(
      RawOrigin::Root.into(),
      test_denom(2),
      BENCH_ASSET,
      TokenOwner::Module,
    )
    .expect("pre-registration failed");

    #[extrinsic_call]
    deregister_token_pair(RawOrigin::Root, test_denom(2));
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
