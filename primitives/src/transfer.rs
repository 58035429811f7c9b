//! Fungible token transfer packets (ICS-20) and denomination traces.

use crate::assets::IBC_DENOM_PREFIX;
use alloc::{
  format,
  string::{String, ToString},
  vec::Vec,
};
use polkadot_sdk::sp_core::hashing::sha2_256;
use polkadot_sdk::sp_runtime::{DispatchError, DispatchResult};
use polkadot_sdk::sp_weights::Weight;
use serde::{Deserialize, Serialize};

/// Success acknowledgement payload written by the transfer application.
pub const SUCCESS_ACK: &[u8] = &[1];

const CHANNEL_PREFIX: &str = "channel-";

/// Packet as handed to the transfer middleware by the relay layer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Packet {
  pub sequence: u64,
  pub source_port: String,
  pub source_channel: String,
  pub destination_port: String,
  pub destination_channel: String,
  pub data: Vec<u8>,
}

/// JSON payload of a fungible token transfer packet.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FungibleTokenPacketData {
  pub denom: String,
  pub amount: String,
  pub sender: String,
  pub receiver: String,
  #[serde(default)]
  pub memo: String,
}

impl FungibleTokenPacketData {
  pub fn decode(bytes: &[u8]) -> Option<Self> {
    serde_json::from_slice(bytes).ok()
  }

  pub fn encode(&self) -> Vec<u8> {
    serde_json::to_vec(self).unwrap_or_default()
  }
}

/// Acknowledgement returned to the relay layer for a received packet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Acknowledgement {
  Result(Vec<u8>),
  Error(DispatchError),
}

impl Acknowledgement {
  pub fn success() -> Self {
    Acknowledgement::Result(SUCCESS_ACK.to_vec())
  }

  pub fn is_success(&self) -> bool {
    matches!(self, Acknowledgement::Result(_))
  }
}

impl From<DispatchError> for Acknowledgement {
  fn from(err: DispatchError) -> Self {
    Acknowledgement::Error(err)
  }
}

/// Lifecycle callbacks invoked by the transfer middleware stack, once per event per packet.
pub trait TransferMiddleware {
  /// Called after the transfer application credited the receiver. Always yields an
  /// acknowledgement; failures are reported as `Acknowledgement::Error`.
  fn on_recv_packet(packet: &Packet, ack: Acknowledgement) -> Acknowledgement;

  /// Called after the transfer application processed the acknowledgement of an outbound packet.
  fn on_acknowledgement_packet(
    packet: &Packet,
    data: &FungibleTokenPacketData,
    ack: &Acknowledgement,
  ) -> DispatchResult;

  /// Called after the transfer application refunded a timed out outbound packet.
  fn on_timeout_packet(packet: &Packet, data: &FungibleTokenPacketData) -> DispatchResult;

  /// Weight the callbacks add to the relayer's transaction.
  fn callback_weight() -> Weight;
}

/// Denomination split into its `port/channel` path and base denomination.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DenomTrace {
  pub path: String,
  pub base_denom: String,
}

impl DenomTrace {
  /// Leading `port/channel` pairs are path segments while the channel part is a
  /// valid channel identifier; the remainder is the base denomination.
  pub fn parse(raw: &str) -> Self {
    let segments: Vec<&str> = raw.split('/').collect();
    let mut hops = 0;
    while hops * 2 + 2 < segments.len() && is_channel_id(segments[hops * 2 + 1]) {
      hops += 1;
    }
    if hops == 0 {
      return Self {
        path: String::new(),
        base_denom: raw.to_string(),
      };
    }
    Self {
      path: segments[..hops * 2].join("/"),
      base_denom: segments[hops * 2..].join("/"),
    }
  }

  /// Number of `port/channel` pairs in the path.
  pub fn hops(&self) -> usize {
    if self.path.is_empty() {
      0
    } else {
      self.path.split('/').count() / 2
    }
  }

  pub fn full_path(&self) -> String {
    if self.path.is_empty() {
      self.base_denom.clone()
    } else {
      format!("{}/{}", self.path, self.base_denom)
    }
  }

  /// Ledger denomination of the trace: `ibc/<SHA-256 of full path>` for vouchers.
  pub fn ibc_denom(&self) -> String {
    if self.path.is_empty() {
      return self.base_denom.clone();
    }
    let hash = sha2_256(self.full_path().as_bytes());
    format!("{IBC_DENOM_PREFIX}{}", hex::encode_upper(hash))
  }
}

fn is_channel_id(segment: &str) -> bool {
  segment
    .strip_prefix(CHANNEL_PREFIX)
    .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Prefix a sending chain adds to a denomination leaving through `port/channel`.
pub fn denom_prefix(port: &str, channel: &str) -> String {
  format!("{port}/{channel}/")
}

/// Whether the receiving chain is where the denomination originated.
pub fn receiver_chain_is_source(source_port: &str, source_channel: &str, denom: &str) -> bool {
  denom.starts_with(&denom_prefix(source_port, source_channel))
}

/// Whether the raw packet denomination has travelled at most one hop.
pub fn is_single_hop(denom: &str) -> bool {
  DenomTrace::parse(denom).hops() <= 1
}

/// Ledger coin decoded from packet data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Coin {
  pub denom: String,
  pub amount: u128,
}

/// Parse an unsigned decimal amount.
pub fn parse_amount(raw: &str) -> Option<u128> {
  if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  raw.parse().ok()
}

/// Coin credited on this chain for a received packet.
pub fn received_coin(
  source_port: &str,
  source_channel: &str,
  destination_port: &str,
  destination_channel: &str,
  raw_denom: &str,
  raw_amount: &str,
) -> Option<Coin> {
  let amount = parse_amount(raw_amount)?;
  let trace = if receiver_chain_is_source(source_port, source_channel, raw_denom) {
    let unprefixed = &raw_denom[denom_prefix(source_port, source_channel).len()..];
    DenomTrace::parse(unprefixed)
  } else {
    let prefixed = format!(
      "{}{raw_denom}",
      denom_prefix(destination_port, destination_channel)
    );
    DenomTrace::parse(&prefixed)
  };
  Some(Coin {
    denom: trace.ibc_denom(),
    amount,
  })
}

/// Coin debited on this chain for an outbound packet.
pub fn sent_coin(raw_denom: &str, raw_amount: &str) -> Option<Coin> {
  let amount = parse_amount(raw_amount)?;
  Some(Coin {
    denom: DenomTrace::parse(raw_denom).ibc_denom(),
    amount,
  })
}
