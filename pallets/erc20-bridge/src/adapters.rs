//! Adapter traits for the ERC20 bridge pallet
//!
//! The pallet never touches the contract-execution engine directly. Everything
//! it needs from it, and from the account and telemetry layers, goes through
//! these traits so the runtime decides how they are backed.

use crate::precompiles::Erc20Precompile;
use frame::prelude::*;
use polkadot_sdk::sp_core::{H160, U256};

/// Interface table of the contract-execution namespace.
pub trait PrecompileRegistry {
  /// Whether an interface is already installed at `address`.
  fn is_registered(address: &H160) -> bool;

  /// Install `precompile` at its address. Must fail without side effects if it cannot.
  fn register(precompile: Erc20Precompile) -> DispatchResult;
}

/// Balances of contract-callable tokens.
pub trait Erc20Ledger {
  fn balance_of(token: H160, holder: H160) -> U256;

  fn mint(token: H160, to: H160, amount: U256) -> DispatchResult;

  fn transfer(token: H160, from: H160, to: H160, amount: U256) -> DispatchResult;
}

/// Decoding of the account identifiers carried in packet payloads.
pub trait AccountIdCodec<AccountId> {
  fn decode(address: &str) -> Option<AccountId>;
}

/// Fire-and-forget counters. Implementations must not panic.
pub trait Telemetry {
  fn on_recv_packet(_denom: &str, _source_port: &str, _source_channel: &str) {}

  fn on_refund_converted(_denom: &str, _amount: u128) {}
}

impl Telemetry for () {}
