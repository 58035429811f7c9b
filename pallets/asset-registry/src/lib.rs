//! Asset Registry Pallet
//!
//! Governance-owned table of token pairs linking a ledger denomination to its
//! contract-callable ERC20 representation.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod weights;
pub use weights::WeightInfo;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

#[frame::pallet]
pub mod pallet {
  use crate::weights::WeightInfo as _;
  use alloc::vec::Vec;
  use frame::deps::frame_support::traits::{EnsureOrigin, fungibles::Inspect as _};
  use frame::prelude::*;
  use polkadot_sdk::pallet_assets;
  use polkadot_sdk::sp_core::{H160, H256};
  use primitives::assets::{
    Denom, TokenOwner, TokenPair, TokenPairRegistry, bounded_denom, denom_address,
  };

  #[pallet::config]
  pub trait Config: frame_system::Config + pallet_assets::Config<AssetId = u32> {
    /// Origin that can register and toggle token pairs (e.g. Governance or Root)
    type RegistryOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    type WeightInfo: crate::weights::WeightInfo;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  /// Registered token pairs by pair id.
  #[pallet::storage]
  #[pallet::getter(fn token_pairs)]
  pub type TokenPairs<T: Config> = StorageMap<_, Blake2_128Concat, H256, TokenPair, OptionQuery>;

  /// Denomination to pair id.
  #[pallet::storage]
  #[pallet::getter(fn denom_to_pair)]
  pub type TokenPairIdByDenom<T: Config> =
    StorageMap<_, Blake2_128Concat, Denom, H256, OptionQuery>;

  /// ERC20 address to pair id.
  #[pallet::storage]
  #[pallet::getter(fn address_to_pair)]
  pub type TokenPairIdByAddress<T: Config> =
    StorageMap<_, Blake2_128Concat, H160, H256, OptionQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// A token pair has been registered.
    TokenPairRegistered {
      pair_id: H256,
      denom: Vec<u8>,
      erc20_address: H160,
      asset_id: u32,
      owner: TokenOwner,
    },
    /// Conversions for a pair were enabled or disabled.
    TokenPairToggled { pair_id: H256, enabled: bool },
    /// A token pair has been removed.
    TokenPairDeregistered { pair_id: H256, denom: Vec<u8> },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// The denomination is empty, too long or cannot be mapped to an address.
    InvalidDenom,
    /// A pair already exists for the denomination.
    TokenPairAlreadyRegistered,
    /// The derived ERC20 address is already bound to another pair.
    AddressAlreadyRegistered,
    /// The ledger asset does not exist in pallet-assets.
    AssetNotFound,
    /// No pair is registered for the denomination.
    TokenPairNotFound,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Register a token pair for a ledger denomination.
    ///
    /// The ERC20 address is derived from the denomination, so vouchers and
    /// native coins get a stable address without deploying anything.
    ///
    /// - `origin`: Must match `RegistryOrigin`.
    /// - `denom`: Ledger denomination, `ibc/<HASH>` for vouchers.
    /// - `asset_id`: Existing pallet-assets asset holding the coin balances.
    /// - `owner`: Which side of the pair is canonical.
    #[pallet::call_index(0)]
    #[pallet::weight(<T as crate::pallet::Config>::WeightInfo::register_token_pair())]
    pub fn register_token_pair(
      origin: OriginFor<T>,
      denom: Vec<u8>,
      asset_id: u32,
      owner: TokenOwner,
    ) -> DispatchResult {
      T::RegistryOrigin::ensure_origin(origin)?;
      // 1. Validate and derive
      let denom = bounded_denom(denom).ok_or(Error::<T>::InvalidDenom)?;
      let denom_str = core::str::from_utf8(&denom).map_err(|_| Error::<T>::InvalidDenom)?;
      let erc20_address = denom_address(denom_str).map_err(|_| Error::<T>::InvalidDenom)?;
      // 2. Check uniqueness on both sides
      ensure!(
        !TokenPairIdByDenom::<T>::contains_key(&denom),
        Error::<T>::TokenPairAlreadyRegistered
      );
      ensure!(
        !TokenPairIdByAddress::<T>::contains_key(erc20_address),
        Error::<T>::AddressAlreadyRegistered
      );
      // 3. Check existence in pallet-assets
      ensure!(
        pallet_assets::Pallet::<T>::asset_exists(asset_id),
        Error::<T>::AssetNotFound
      );
      // 4. Persist
      let pair = TokenPair::new(erc20_address, denom.clone(), asset_id, owner);
      let pair_id = pair.id();
      TokenPairs::<T>::insert(pair_id, pair);
      TokenPairIdByDenom::<T>::insert(&denom, pair_id);
      TokenPairIdByAddress::<T>::insert(erc20_address, pair_id);
      Self::deposit_event(Event::TokenPairRegistered {
        pair_id,
        denom: denom.into_inner(),
        erc20_address,
        asset_id,
        owner,
      });
      Ok(())
    }

    /// Flip the `enabled` flag of a pair.
    #[pallet::call_index(1)]
    #[pallet::weight(<T as crate::pallet::Config>::WeightInfo::toggle_conversion())]
    pub fn toggle_conversion(origin: OriginFor<T>, denom: Vec<u8>) -> DispatchResult {
      T::RegistryOrigin::ensure_origin(origin)?;
      let pair_id = Self::pair_id_of(denom)?;
      let enabled = TokenPairs::<T>::try_mutate(pair_id, |maybe_pair| {
        let pair = maybe_pair.as_mut().ok_or(Error::<T>::TokenPairNotFound)?;
        pair.enabled = !pair.enabled;
        Ok::<_, Error<T>>(pair.enabled)
      })?;
      Self::deposit_event(Event::TokenPairToggled { pair_id, enabled });
      Ok(())
    }

    /// Remove a pair and both of its index entries.
    #[pallet::call_index(2)]
    #[pallet::weight(<T as crate::pallet::Config>::WeightInfo::deregister_token_pair())]
    pub fn deregister_token_pair(origin: OriginFor<T>, denom: Vec<u8>) -> DispatchResult {
      T::RegistryOrigin::ensure_origin(origin)?;
      let pair_id = Self::pair_id_of(denom)?;
      let pair = TokenPairs::<T>::take(pair_id).ok_or(Error::<T>::TokenPairNotFound)?;
      TokenPairIdByDenom::<T>::remove(&pair.denom);
      TokenPairIdByAddress::<T>::remove(pair.erc20_address);
      Self::deposit_event(Event::TokenPairDeregistered {
        pair_id,
        denom: pair.denom.into_inner(),
      });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    fn pair_id_of(denom: Vec<u8>) -> Result<H256, DispatchError> {
      let denom = bounded_denom(denom).ok_or(Error::<T>::InvalidDenom)?;
      Ok(TokenPairIdByDenom::<T>::get(&denom).ok_or(Error::<T>::TokenPairNotFound)?)
    }
  }

  /// Read path used by the transfer callbacks.
  impl<T: Config> TokenPairRegistry for Pallet<T> {
    fn token_pair_id(denom: &[u8]) -> Option<H256> {
      let denom = Denom::try_from(denom.to_vec()).ok()?;
      TokenPairIdByDenom::<T>::get(denom)
    }

    fn token_pair_id_by_address(address: &H160) -> Option<H256> {
      TokenPairIdByAddress::<T>::get(address)
    }

    fn token_pair(id: &H256) -> Option<TokenPair> {
      TokenPairs::<T>::get(id)
    }
  }
}
