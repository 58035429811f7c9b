use alloc::vec::Vec;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use polkadot_sdk::sp_core::ConstU32;
use polkadot_sdk::sp_runtime::BoundedVec;
use scale_info::TypeInfo;

pub const MAX_CHANNEL_ID_LENGTH: u32 = 64;
pub const MAX_EVM_CHANNELS: u32 = 16;

pub type ChannelId = BoundedVec<u8, ConstU32<MAX_CHANNEL_ID_LENGTH>>;

/// Governance-controlled switches, read once per lifecycle invocation.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo,
)]
pub struct BridgeParams {
  /// Global switch for every conversion and activation
  pub enable_erc20: bool,
  /// Channels on which a transfer to oneself is a genuine bridge-in rather than recovery
  pub evm_channels: BoundedVec<ChannelId, ConstU32<MAX_EVM_CHANNELS>>,
}

impl Default for BridgeParams {
  fn default() -> Self {
    Self {
      enable_erc20: true,
      evm_channels: BoundedVec::new(),
    }
  }
}

impl BridgeParams {
  pub fn new(enable_erc20: bool, evm_channels: Vec<Vec<u8>>) -> Option<Self> {
    let channels = evm_channels
      .into_iter()
      .map(|channel| ChannelId::try_from(channel).ok())
      .collect::<Option<Vec<_>>>()?;
    Some(Self {
      enable_erc20,
      evm_channels: BoundedVec::try_from(channels).ok()?,
    })
  }

  pub fn is_evm_channel(&self, channel: &str) -> bool {
    self
      .evm_channels
      .iter()
      .any(|c| c.as_slice() == channel.as_bytes())
  }
}

/// Why a lifecycle event left the packet untouched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PassThroughReason {
  ConversionDisabled,
  /// Sender equals receiver outside an EVM channel
  SelfTransferRecovery,
  ModuleAccount,
  MultiHopDenom,
  UnregisteredDenom,
  PairDisabled,
  NativeCoinPair,
  /// Nothing to convert
  ZeroAmount,
  /// The counterparty accepted the transfer
  AcknowledgementSucceeded,
}

/// Successful result of one lifecycle invocation. Failures are the `Err` side.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConversionOutcome {
  /// The amount moved from coin to token representation
  Converted(u128),
  /// A callable representation is in place for the received denomination
  Registered { newly_activated: bool },
  PassThrough(PassThroughReason),
}
