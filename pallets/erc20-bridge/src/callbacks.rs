//! Transfer middleware callbacks.
//!
//! Invoked once per lifecycle event per packet, after the transfer application
//! itself. Receipt only guarantees that a callable representation exists; value
//! changes representation only when an outbound transfer is refunded.

use crate::{
  Config, Error, Event, LOG_TARGET, Pallet, Params,
  adapters::{AccountIdCodec, PrecompileRegistry, Telemetry},
  types::{ConversionOutcome, PassThroughReason},
};
use frame::deps::frame_support::traits::Contains;
use frame::deps::sp_runtime::traits::Convert;
use frame::prelude::*;
use primitives::{
  assets::{TokenPair, TokenPairRegistry, denom_address},
  transfer::{
    Acknowledgement, FungibleTokenPacketData, Packet, TransferMiddleware, is_single_hop,
    received_coin, sent_coin,
  },
};

/// Outcome of a pair lookup: the usable pair, or why the packet passes through.
fn usable_pair<R: TokenPairRegistry>(denom: &str) -> Result<TokenPair, PassThroughReason> {
  let pair = R::lookup_by_denom(denom.as_bytes()).ok_or(PassThroughReason::UnregisteredDenom)?;
  if !pair.enabled {
    return Err(PassThroughReason::PairDisabled);
  }
  if pair.is_native_coin() {
    return Err(PassThroughReason::NativeCoinPair);
  }
  Ok(pair)
}

impl<T: Config> Pallet<T> {
  /// Decision sequence for a received packet.
  pub fn process_recv_packet(packet: &Packet) -> Result<ConversionOutcome, DispatchError> {
    use ConversionOutcome::PassThrough;

    let data =
      FungibleTokenPacketData::decode(&packet.data).ok_or(Error::<T>::InvalidPacketData)?;
    let params = Params::<T>::get();
    if !params.enable_erc20 {
      return Ok(PassThrough(PassThroughReason::ConversionDisabled));
    }

    let sender = T::AccountCodec::decode(&data.sender).ok_or(Error::<T>::InvalidAccountId)?;
    let receiver =
      T::AccountCodec::decode(&data.receiver).ok_or(Error::<T>::InvalidAccountId)?;
    if sender == receiver && !params.is_evm_channel(&packet.destination_channel) {
      return Ok(PassThrough(PassThroughReason::SelfTransferRecovery));
    }
    if T::ModuleAccounts::contains(&sender) {
      return Ok(PassThrough(PassThroughReason::ModuleAccount));
    }

    let coin = received_coin(
      &packet.source_port,
      &packet.source_channel,
      &packet.destination_port,
      &packet.destination_channel,
      &data.denom,
      &data.amount,
    )
    .ok_or(Error::<T>::InvalidAmount)?;
    if !is_single_hop(&data.denom) {
      return Ok(PassThrough(PassThroughReason::MultiHopDenom));
    }
    let pair = match usable_pair::<T::Registry>(&coin.denom) {
      Ok(pair) => pair,
      Err(reason) => return Ok(PassThrough(reason)),
    };

    let address = denom_address(&coin.denom).map_err(|_| Error::<T>::InvalidDenom)?;
    let newly_activated = if T::Precompiles::is_registered(&address) {
      false
    } else {
      Self::ensure_activated(&pair)?
    };

    T::Telemetry::on_recv_packet(&coin.denom, &packet.source_port, &packet.source_channel);
    Self::deposit_event(Event::PacketReceived {
      denom: coin.denom.into_bytes(),
      source_port: packet.source_port.as_bytes().to_vec(),
      source_channel: packet.source_channel.as_bytes().to_vec(),
    });
    Ok(ConversionOutcome::Registered { newly_activated })
  }

  /// Shared path for failed acknowledgements and timeouts: the transfer layer
  /// already refunded the sender's coins, which are now converted back to tokens.
  pub fn convert_refund(
    data: &FungibleTokenPacketData,
  ) -> Result<ConversionOutcome, DispatchError> {
    use ConversionOutcome::PassThrough;

    let sender = T::AccountCodec::decode(&data.sender).ok_or(Error::<T>::InvalidAccountId)?;
    let params = Params::<T>::get();
    if !params.enable_erc20 {
      return Ok(PassThrough(PassThroughReason::ConversionDisabled));
    }
    if T::ModuleAccounts::contains(&sender) {
      return Ok(PassThrough(PassThroughReason::ModuleAccount));
    }

    let coin = sent_coin(&data.denom, &data.amount).ok_or(Error::<T>::InvalidAmount)?;
    if coin.amount == 0 {
      return Ok(PassThrough(PassThroughReason::ZeroAmount));
    }
    let pair = match usable_pair::<T::Registry>(&coin.denom) {
      Ok(pair) => pair,
      Err(reason) => return Ok(PassThrough(reason)),
    };

    let receiver = T::AddressMapping::convert(sender.clone());
    Self::do_convert_coin(&pair, coin.amount, &sender, receiver)?;

    log::info!(
      target: LOG_TARGET,
      "converted refund of {} {} back to ERC20 for {sender:?}",
      coin.amount,
      coin.denom,
    );
    T::Telemetry::on_refund_converted(&coin.denom, coin.amount);
    Self::deposit_event(Event::RefundConverted {
      sender,
      denom: coin.denom.into_bytes(),
      amount: coin.amount,
    });
    Ok(ConversionOutcome::Converted(coin.amount))
  }

  /// Only a failed acknowledgement triggers the refund conversion.
  pub fn process_acknowledgement(
    data: &FungibleTokenPacketData,
    ack: &Acknowledgement,
  ) -> Result<ConversionOutcome, DispatchError> {
    match ack {
      Acknowledgement::Error(_) => Self::convert_refund(data),
      Acknowledgement::Result(_) => Ok(ConversionOutcome::PassThrough(
        PassThroughReason::AcknowledgementSucceeded,
      )),
    }
  }
}

impl<T: Config> TransferMiddleware for Pallet<T> {
  fn on_recv_packet(packet: &Packet, ack: Acknowledgement) -> Acknowledgement {
    match Self::process_recv_packet(packet) {
      Ok(ConversionOutcome::PassThrough(reason)) => {
        log::debug!(
          target: LOG_TARGET,
          "packet {} passed through: {reason:?}",
          packet.sequence,
        );
        ack
      }
      Ok(_) => ack,
      Err(err) => {
        log::warn!(
          target: LOG_TARGET,
          "packet {} on {}/{} rejected: {err:?}",
          packet.sequence,
          packet.destination_port,
          packet.destination_channel,
        );
        err.into()
      }
    }
  }

  fn on_acknowledgement_packet(
    _packet: &Packet,
    data: &FungibleTokenPacketData,
    ack: &Acknowledgement,
  ) -> DispatchResult {
    Self::process_acknowledgement(data, ack).map(|_| ())
  }

  fn on_timeout_packet(_packet: &Packet, data: &FungibleTokenPacketData) -> DispatchResult {
    Self::convert_refund(data).map(|_| ())
  }

  fn callback_weight() -> Weight {
    // Conversion bookkeeping is not charged to relayers.
    Weight::zero()
  }
}
