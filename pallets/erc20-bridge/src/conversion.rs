//! Coin to token conversion.

use crate::{Config, Error, Pallet, adapters::Erc20Ledger};
use frame::deps::frame_support::{
  storage::with_storage_layer,
  traits::{
    fungibles::Mutate,
    tokens::{Fortitude, Precision, Preservation},
  },
};
use frame::prelude::*;
use polkadot_sdk::sp_core::{H160, U256};
use primitives::assets::{TokenOwner, TokenPair};

impl<T: Config> Pallet<T> {
  /// Move `amount` of `pair` from `sender`'s ledger balance to `receiver`'s token balance.
  ///
  /// - Native coin: the coins go into the pallet escrow and the same amount of token is minted.
  /// - Native ERC20: the voucher coins are burned and escrowed tokens are released.
  ///
  /// All writes share one storage layer. A zero amount returns before touching state.
  pub fn do_convert_coin(
    pair: &TokenPair,
    amount: u128,
    sender: &T::AccountId,
    receiver: H160,
  ) -> DispatchResult {
    if amount == 0 {
      return Ok(());
    }
    let value = U256::from(amount);
    let token = pair.erc20_address;

    with_storage_layer(|| {
      let before = T::Erc20::balance_of(token, receiver);
      match pair.owner {
        TokenOwner::Module => {
          T::Assets::transfer(
            pair.asset_id,
            sender,
            &Self::account_id(),
            amount,
            Preservation::Expendable,
          )?;
          T::Erc20::mint(token, receiver, value)?;
        }
        TokenOwner::External => {
          T::Assets::burn_from(
            pair.asset_id,
            sender,
            amount,
            Preservation::Expendable,
            Precision::Exact,
            Fortitude::Polite,
          )?;
          T::Erc20::transfer(token, Self::escrow_address(), receiver, value)?;
        }
      }
      let after = T::Erc20::balance_of(token, receiver);
      ensure!(
        before.checked_add(value) == Some(after),
        Error::<T>::BalanceInvariantViolated
      );
      Ok(())
    })
  }
}
