use crate::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_support::traits::EnsureOrigin;
use polkadot_sdk::frame_system::RawOrigin;
use polkadot_sdk::sp_core::H160;
use primitives::assets::{TokenOwner, denom_address};

const BENCH_DENOM: &[u8] = b"ubench";
const BENCH_AMOUNT: u128 = 1_000_000;

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn convert_coin() -> Result<(), BenchmarkError> {
    let caller: T::AccountId = whitelisted_caller();
    T::BenchmarkHelper::setup_token_pair(BENCH_DENOM, TokenOwner::External)
      .map_err(|_| BenchmarkError::Stop("token pair setup failed"))?;
    T::BenchmarkHelper::fund(&caller, BENCH_DENOM, BENCH_AMOUNT)
      .map_err(|_| BenchmarkError::Stop("funding failed"))?;
    let receiver = H160::repeat_byte(0x42);

    #[extrinsic_call]
    _(
      RawOrigin::Signed(caller),
      BENCH_DENOM.to_vec(),
      BENCH_AMOUNT,
      receiver,
    );

    Ok(())
  }

  #[benchmark]
  fn update_params() -> Result<(), BenchmarkError> {
    let origin = T::AdminOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
    let channels = (0..MAX_EVM_CHANNELS)
      .map(|i| alloc::format!("channel-{i}").into_bytes())
      .collect();
    let params = BridgeParams::new(true, channels).ok_or(BenchmarkError::Stop("bad params"))?;

    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, params.clone());

    assert_eq!(Params::<T>::get(), params);
    Ok(())
  }

  #[benchmark]
  fn activate_precompile() -> Result<(), BenchmarkError> {
    let origin = T::AdminOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
    T::BenchmarkHelper::setup_token_pair(BENCH_DENOM, TokenOwner::External)
      .map_err(|_| BenchmarkError::Stop("token pair setup failed"))?;

    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, BENCH_DENOM.to_vec());

    let address = denom_address("ubench").map_err(|_| BenchmarkError::Stop("bad denom"))?;
    assert!(T::Precompiles::is_registered(&address));
    Ok(())
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
