use alloc::vec::Vec;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use polkadot_sdk::sp_core::{
  ConstU32, H160, H256,
  hashing::{blake2_256, sha2_256},
};
use polkadot_sdk::sp_runtime::BoundedVec;
use scale_info::TypeInfo;

/// Maximum length of a coin denomination accepted by the registry.
pub const MAX_DENOM_LENGTH: u32 = 128;

/// Prefix of hashed cross-chain voucher denominations (`ibc/<HASH>`).
pub const IBC_DENOM_PREFIX: &str = "ibc/";

/// Width of a contract-callable representation address.
pub const ADDRESS_LENGTH: usize = 20;

pub type Denom = BoundedVec<u8, ConstU32<MAX_DENOM_LENGTH>>;

/// Which side of a token pair is the canonical one.
///
/// - `Module`: the ledger coin is native, the token is a wrapper minted against escrowed coins.
/// - `External`: the token is native, the ledger coin is a voucher backed by escrowed tokens.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub enum TokenOwner {
  #[default]
  Module,
  External,
}

/// Registered association between a ledger denomination and its token address.
#[derive(Clone, Debug, Decode, Encode, Eq, MaxEncodedLen, PartialEq, TypeInfo)]
pub struct TokenPair {
  /// Address of the contract-callable representation
  pub erc20_address: H160,
  /// Ledger-native denomination (e.g. `uatom` or `ibc/27394F...`)
  pub denom: Denom,
  /// Ledger asset holding the coin balances
  pub asset_id: u32,
  /// Whether conversions are currently allowed
  pub enabled: bool,
  pub owner: TokenOwner,
}

impl TokenPair {
  pub fn new(erc20_address: H160, denom: Denom, asset_id: u32, owner: TokenOwner) -> Self {
    Self {
      erc20_address,
      denom,
      asset_id,
      enabled: true,
      owner,
    }
  }

  /// Deterministic identifier of the pair: BLAKE2-256 over `(erc20_address, denom)`.
  pub fn id(&self) -> H256 {
    token_pair_id(&self.erc20_address, &self.denom)
  }

  pub fn is_native_coin(&self) -> bool {
    self.owner == TokenOwner::Module
  }

  pub fn is_native_erc20(&self) -> bool {
    self.owner == TokenOwner::External
  }

  pub fn denom_str(&self) -> Option<&str> {
    core::str::from_utf8(&self.denom).ok()
  }
}

pub fn token_pair_id(erc20_address: &H160, denom: &[u8]) -> H256 {
  H256(blake2_256(&(erc20_address, denom).encode()))
}

/// Reasons a denomination cannot be mapped to an address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DenomError {
  Empty,
  /// `ibc/` voucher whose suffix is not a 32-byte hex hash
  InvalidVoucherHash,
}

/// Derive the representation address of a denomination.
///
/// Vouchers already carry a SHA-256 hash of their trace, which is used directly:
/// the address is its last 20 bytes, as the EVM's bytes-to-address conversion
/// keeps them. Every other denomination is hashed with SHA-256 and the address
/// is the first 20 bytes of that hash.
pub fn denom_address(denom: &str) -> Result<H160, DenomError> {
  if denom.trim().is_empty() {
    return Err(DenomError::Empty);
  }
  match denom.strip_prefix(IBC_DENOM_PREFIX) {
    Some(voucher) => {
      let hash = parse_voucher_hash(voucher)?;
      Ok(H160::from_slice(&hash[hash.len() - ADDRESS_LENGTH..]))
    }
    None => Ok(H160::from_slice(
      &sha2_256(denom.as_bytes())[..ADDRESS_LENGTH],
    )),
  }
}

fn parse_voucher_hash(voucher: &str) -> Result<[u8; 32], DenomError> {
  let mut hash = [0u8; 32];
  hex::decode_to_slice(voucher, &mut hash).map_err(|_| DenomError::InvalidVoucherHash)?;
  Ok(hash)
}

/// Read access to the governance-owned token pair table.
pub trait TokenPairRegistry {
  fn token_pair_id(denom: &[u8]) -> Option<H256>;

  fn token_pair_id_by_address(address: &H160) -> Option<H256>;

  fn token_pair(id: &H256) -> Option<TokenPair>;

  fn lookup_by_denom(denom: &[u8]) -> Option<TokenPair> {
    Self::token_pair_id(denom).and_then(|id| Self::token_pair(&id))
  }

  fn lookup_by_address(address: &H160) -> Option<TokenPair> {
    Self::token_pair_id_by_address(address).and_then(|id| Self::token_pair(&id))
  }
}

impl TokenPairRegistry for () {
  fn token_pair_id(_denom: &[u8]) -> Option<H256> {
    None
  }

  fn token_pair_id_by_address(_address: &H160) -> Option<H256> {
    None
  }

  fn token_pair(_id: &H256) -> Option<TokenPair> {
    None
  }
}

/// Bound a raw denomination, rejecting empty and oversized input.
pub fn bounded_denom(denom: Vec<u8>) -> Option<Denom> {
  if denom.is_empty() {
    return None;
  }
  Denom::try_from(denom).ok()
}
