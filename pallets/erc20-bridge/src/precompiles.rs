//! On-demand installation of ERC20 interfaces for registered token pairs.

use crate::{Config, Error, Event, LOG_TARGET, Pallet, adapters::PrecompileRegistry};
use frame::deps::frame_support::storage::with_storage_layer;
use frame::prelude::*;
use polkadot_sdk::sp_core::H160;
use primitives::assets::{TokenPair, denom_address};

/// ERC20 interface bound to a token pair.
///
/// The runtime's namespace wires the ledger, authorization and transfer
/// collaborators when it installs the interface; the pallet only decides what
/// goes where.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Erc20Precompile {
  pub address: H160,
  pub pair: TokenPair,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrecompileError {
  /// The pair's denomination does not map to an address
  InvalidDenom,
  /// The pair's address differs from the one derived from its denomination
  AddressMismatch,
}

impl Erc20Precompile {
  pub fn new(pair: TokenPair) -> Result<Self, PrecompileError> {
    let denom = pair.denom_str().ok_or(PrecompileError::InvalidDenom)?;
    let address = denom_address(denom).map_err(|_| PrecompileError::InvalidDenom)?;
    if address != pair.erc20_address {
      return Err(PrecompileError::AddressMismatch);
    }
    Ok(Self { address, pair })
  }
}

impl<T: Config> From<PrecompileError> for Error<T> {
  fn from(err: PrecompileError) -> Self {
    match err {
      PrecompileError::InvalidDenom => Error::<T>::InvalidDenom,
      PrecompileError::AddressMismatch => Error::<T>::PrecompileAddressMismatch,
    }
  }
}

impl<T: Config> Pallet<T> {
  /// Make sure an ERC20 interface is installed for `pair`.
  ///
  /// Returns whether this call installed it. Check and registration run in one
  /// storage layer, so a failed registration leaves nothing behind.
  pub fn ensure_activated(pair: &TokenPair) -> Result<bool, DispatchError> {
    with_storage_layer(|| {
      if T::Precompiles::is_registered(&pair.erc20_address) {
        return Ok(false);
      }
      let precompile = Erc20Precompile::new(pair.clone()).map_err(Error::<T>::from)?;
      let address = precompile.address;
      T::Precompiles::register(precompile)?;

      log::info!(
        target: LOG_TARGET,
        "activated ERC20 interface at {address:?} for pair {:?}",
        pair.id(),
      );
      Self::deposit_event(Event::PrecompileActivated {
        address,
        denom: pair.denom.to_vec(),
      });
      Ok(true)
    })
  }
}
