//! ERC20 Bridge Pallet
//!
//! Keeps coins that arrive or bounce back through the transfer protocol usable
//! from contract code. On receipt it lazily installs the ERC20 interface of a
//! registered pair; on a failed acknowledgement or timeout it converts the
//! refunded coins back into their ERC20 representation.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod adapters;
pub mod callbacks;
pub mod conversion;
pub mod precompiles;
pub mod types;

pub use adapters::*;
pub use precompiles::{Erc20Precompile, PrecompileError};
pub use types::*;

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

pub(crate) const LOG_TARGET: &str = "runtime::erc20-bridge";

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  /// Register an enabled pair for `denom` backed by a ledger asset.
  fn setup_token_pair(
    denom: &[u8],
    owner: primitives::assets::TokenOwner,
  ) -> frame::deps::sp_runtime::DispatchResult;
  /// Credit `who` with `amount` coins of `denom`.
  fn fund(who: &AccountId, denom: &[u8], amount: u128) -> frame::deps::sp_runtime::DispatchResult;
}

#[frame::pallet]
pub mod pallet {
  use super::WeightInfo;
  use crate::types::BridgeParams;
  use alloc::vec::Vec;
  use frame::deps::{
    frame_support::{
      PalletId,
      traits::{
        Contains,
        fungibles::{Inspect as FungiblesInspect, Mutate as FungiblesMutate},
      },
    },
    sp_runtime::traits::{AccountIdConversion, Convert},
  };
  use frame::prelude::*;
  use polkadot_sdk::sp_core::H160;
  use primitives::assets::TokenPairRegistry;

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Ledger-native coin balances
    type Assets: FungiblesInspect<Self::AccountId, AssetId = u32, Balance = u128>
      + FungiblesMutate<Self::AccountId, AssetId = u32, Balance = u128>;

    /// Governance-owned token pair table (read only)
    type Registry: TokenPairRegistry;

    /// Interface table of the contract-execution namespace
    type Precompiles: crate::adapters::PrecompileRegistry;

    /// Contract-callable token balances
    type Erc20: crate::adapters::Erc20Ledger;

    /// Decoder for sender and receiver ids in packet payloads
    type AccountCodec: crate::adapters::AccountIdCodec<Self::AccountId>;

    /// Protocol-owned accounts, which keep their coins as coins
    type ModuleAccounts: Contains<Self::AccountId>;

    /// Contract-side address of a ledger account
    type AddressMapping: Convert<Self::AccountId, H160>;

    /// Counters for received packets and converted refunds
    type Telemetry: crate::adapters::Telemetry;

    /// The pallet ID, used to derive the escrow account
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Origin that can update params and force activations
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Current bridge switches (can be updated by governance)
  #[pallet::storage]
  #[pallet::getter(fn params)]
  pub type Params<T: Config> = StorageValue<_, BridgeParams, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// A transfer packet for a convertible denomination was received
    PacketReceived {
      denom: Vec<u8>,
      source_port: Vec<u8>,
      source_channel: Vec<u8>,
    },
    /// An ERC20 interface was installed for a token pair
    PrecompileActivated { address: H160, denom: Vec<u8> },
    /// Coins were converted on request of their owner
    CoinConverted {
      sender: T::AccountId,
      receiver: H160,
      denom: Vec<u8>,
      amount: u128,
    },
    /// Refunded coins of a failed outbound transfer were converted back to ERC20
    RefundConverted {
      sender: T::AccountId,
      denom: Vec<u8>,
      amount: u128,
    },
    /// Bridge params replaced
    ParamsUpdated { params: BridgeParams },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Packet payload is not a fungible token transfer
    InvalidPacketData,
    /// Sender or receiver cannot be decoded
    InvalidAccountId,
    /// Amount is not an unsigned decimal integer
    InvalidAmount,
    /// Denomination is empty or cannot be mapped to an address
    InvalidDenom,
    /// Pair address does not match its denomination
    PrecompileAddressMismatch,
    /// Conversions are globally disabled
    ConversionDisabled,
    /// No pair registered for the denomination
    TokenPairNotFound,
    /// Conversions are disabled for this pair
    TokenPairDisabled,
    /// Native coin pairs get no interface installed by the bridge
    NativeCoinPair,
    /// Token balance of the receiver did not grow by the converted amount
    BalanceInvariantViolated,
  }

  #[pallet::genesis_config]
  pub struct GenesisConfig<T: Config> {
    pub enable_erc20: bool,
    pub evm_channels: Vec<Vec<u8>>,
    #[serde(skip)]
    pub _marker: core::marker::PhantomData<T>,
  }

  impl<T: Config> Default for GenesisConfig<T> {
    fn default() -> Self {
      Self {
        enable_erc20: true,
        evm_channels: Vec::new(),
        _marker: Default::default(),
      }
    }
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      let params = BridgeParams::new(self.enable_erc20, self.evm_channels.clone())
        .expect("genesis EVM channels exceed bounds");
      Params::<T>::put(params);
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Convert ledger coins of a registered pair into its ERC20 representation.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::convert_coin())]
    pub fn convert_coin(
      origin: OriginFor<T>,
      denom: Vec<u8>,
      amount: u128,
      receiver: H160,
    ) -> DispatchResult {
      let sender = ensure_signed(origin)?;
      ensure!(Params::<T>::get().enable_erc20, Error::<T>::ConversionDisabled);
      let pair = T::Registry::lookup_by_denom(&denom).ok_or(Error::<T>::TokenPairNotFound)?;
      ensure!(pair.enabled, Error::<T>::TokenPairDisabled);

      Self::do_convert_coin(&pair, amount, &sender, receiver)?;

      Self::deposit_event(Event::CoinConverted {
        sender,
        receiver,
        denom,
        amount,
      });
      Ok(())
    }

    /// Replace the bridge params.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::update_params())]
    pub fn update_params(origin: OriginFor<T>, params: BridgeParams) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Params::<T>::put(params.clone());
      Self::deposit_event(Event::ParamsUpdated { params });
      Ok(())
    }

    /// Install the ERC20 interface of a registered pair without waiting for a packet.
    ///
    /// Retries an activation that failed during receipt.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::activate_precompile())]
    pub fn activate_precompile(origin: OriginFor<T>, denom: Vec<u8>) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      let pair = T::Registry::lookup_by_denom(&denom).ok_or(Error::<T>::TokenPairNotFound)?;
      ensure!(pair.enabled, Error::<T>::TokenPairDisabled);
      ensure!(!pair.is_native_coin(), Error::<T>::NativeCoinPair);
      Self::ensure_activated(&pair)?;
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Escrow account holding coins of native coin pairs
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// Contract-side address of the escrow account, holding tokens of native ERC20 pairs
    pub fn escrow_address() -> H160 {
      T::AddressMapping::convert(Self::account_id())
    }
  }
}
