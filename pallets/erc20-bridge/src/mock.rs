use crate as pallet_erc20_bridge;
use crate::adapters::{AccountIdCodec, Erc20Ledger, PrecompileRegistry, Telemetry};
use crate::precompiles::Erc20Precompile;
use codec::Encode;
use core::cell::{Cell, RefCell};
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl, parameter_types,
  storage::unhashed,
  traits::{ConstU32, ConstU128, Contains},
};
use polkadot_sdk::frame_system::{self, EnsureRoot, EnsureSigned};
use polkadot_sdk::pallet_balances;
use polkadot_sdk::sp_core::{H160, U256};
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError, DispatchResult,
  traits::{Convert, IdentityLookup},
};
use primitives::assets::{TokenOwner, TokenPair, TokenPairRegistry};

type Block = frame_system::mocking::MockBlock<Test>;
type Balance = u128;
type AccountId = u64;

construct_runtime!(
  pub enum Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    AssetRegistry: pallet_asset_registry,
    Erc20Bridge: pallet_erc20_bridge,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<Balance>;
}

#[derive_impl(pallet_balances::config_preludes::TestDefaultConfig)]
impl pallet_balances::Config for Test {
  type Balance = Balance;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
}

impl polkadot_sdk::pallet_assets::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Balance = Balance;
  type AssetId = u32;
  type AssetIdParameter = u32;
  type Currency = Balances;
  type CreateOrigin = EnsureSigned<AccountId>;
  type ForceOrigin = EnsureRoot<AccountId>;
  type AssetDeposit = ConstU128<1>;
  type AssetAccountDeposit = ConstU128<1>;
  type MetadataDepositBase = ConstU128<1>;
  type MetadataDepositPerByte = ConstU128<1>;
  type ApprovalDeposit = ConstU128<1>;
  type StringLimit = ConstU32<50>;
  type Freezer = ();
  type Extra = ();
  type ReserveData = ();
  type WeightInfo = ();
  type RemoveItemsLimit = ConstU32<1000>;
  type CallbackHandle = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = ();
  type Holder = ();
}

impl pallet_asset_registry::Config for Test {
  type RegistryOrigin = EnsureRoot<AccountId>;
  type WeightInfo = ();
}

pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;
pub const MODULE_ACCOUNT: AccountId = 100;

pub const ATOM_ASSET: u32 = 1;
pub const OSMO_ASSET: u32 = 2;
pub const INITIAL_COINS: u128 = 1_000;

/// Ledger denomination of `uatom` received over `transfer/channel-0`
pub const ATOM_VOUCHER: &str = "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2";

thread_local! {
  static FAIL_REGISTER: Cell<bool> = const { Cell::new(false) };
  static FAIL_MINT: Cell<bool> = const { Cell::new(false) };
  static SHORT_MINT: Cell<bool> = const { Cell::new(false) };
  static ENGINE_QUERIES: Cell<u32> = const { Cell::new(0) };
  static REGISTRATIONS: RefCell<Vec<H160>> = const { RefCell::new(Vec::new()) };
  static RECV_COUNT: Cell<u32> = const { Cell::new(0) };
  static REFUNDS: RefCell<Vec<(String, u128)>> = const { RefCell::new(Vec::new()) };
}

pub fn set_fail_register(fail: bool) {
  FAIL_REGISTER.with(|f| f.set(fail));
}

pub fn set_fail_mint(fail: bool) {
  FAIL_MINT.with(|f| f.set(fail));
}

pub fn set_short_mint(short: bool) {
  SHORT_MINT.with(|f| f.set(short));
}

pub fn engine_queries() -> u32 {
  ENGINE_QUERIES.with(|c| c.get())
}

pub fn registrations() -> Vec<H160> {
  REGISTRATIONS.with(|r| r.borrow().clone())
}

pub fn recv_count() -> u32 {
  RECV_COUNT.with(|c| c.get())
}

pub fn refunds() -> Vec<(String, u128)> {
  REFUNDS.with(|r| r.borrow().clone())
}

/// Interface table kept in raw storage so storage layers cover it
pub struct MockPrecompiles;

fn precompile_key(address: &H160) -> Vec<u8> {
  (b"mock/precompile", address).encode()
}

impl PrecompileRegistry for MockPrecompiles {
  fn is_registered(address: &H160) -> bool {
    ENGINE_QUERIES.with(|c| c.set(c.get() + 1));
    unhashed::exists(&precompile_key(address))
  }

  fn register(precompile: Erc20Precompile) -> DispatchResult {
    if FAIL_REGISTER.with(|f| f.get()) {
      return Err(DispatchError::Other("precompile namespace unavailable"));
    }
    unhashed::put(
      &precompile_key(&precompile.address),
      &precompile.pair.denom.to_vec(),
    );
    REGISTRATIONS.with(|r| r.borrow_mut().push(precompile.address));
    Ok(())
  }
}

pub struct MockErc20;

fn balance_key(token: &H160, holder: &H160) -> Vec<u8> {
  (b"mock/erc20", token, holder).encode()
}

/// Credit `holder` with tokens outside of any conversion (e.g. escrow seeding)
pub fn set_token_balance(token: H160, holder: H160, amount: u128) {
  unhashed::put(&balance_key(&token, &holder), &U256::from(amount));
}

pub fn token_balance(token: H160, holder: H160) -> U256 {
  MockErc20::balance_of(token, holder)
}

impl Erc20Ledger for MockErc20 {
  fn balance_of(token: H160, holder: H160) -> U256 {
    unhashed::get_or_default(&balance_key(&token, &holder))
  }

  fn mint(token: H160, to: H160, amount: U256) -> DispatchResult {
    if FAIL_MINT.with(|f| f.get()) {
      return Err(DispatchError::Other("mint reverted"));
    }
    let minted = if SHORT_MINT.with(|f| f.get()) {
      amount.saturating_sub(U256::one())
    } else {
      amount
    };
    let balance = Self::balance_of(token, to);
    unhashed::put(&balance_key(&token, &to), &(balance + minted));
    Ok(())
  }

  fn transfer(token: H160, from: H160, to: H160, amount: U256) -> DispatchResult {
    let from_balance = Self::balance_of(token, from);
    if from_balance < amount {
      return Err(DispatchError::Other("insufficient token balance"));
    }
    unhashed::put(&balance_key(&token, &from), &(from_balance - amount));
    let to_balance = Self::balance_of(token, to);
    unhashed::put(&balance_key(&token, &to), &(to_balance + amount));
    Ok(())
  }
}

/// Packet account ids are decimal account numbers
pub struct DecimalAccountCodec;
impl AccountIdCodec<AccountId> for DecimalAccountCodec {
  fn decode(address: &str) -> Option<AccountId> {
    address.parse().ok()
  }
}

pub struct ModuleAccounts;
impl Contains<AccountId> for ModuleAccounts {
  fn contains(who: &AccountId) -> bool {
    *who == MODULE_ACCOUNT || *who == Erc20Bridge::account_id()
  }
}

pub struct AccountToAddress;
impl Convert<AccountId, H160> for AccountToAddress {
  fn convert(who: AccountId) -> H160 {
    H160::from_low_u64_be(who)
  }
}

pub struct MockTelemetry;
impl Telemetry for MockTelemetry {
  fn on_recv_packet(_denom: &str, _source_port: &str, _source_channel: &str) {
    RECV_COUNT.with(|c| c.set(c.get() + 1));
  }

  fn on_refund_converted(denom: &str, amount: u128) {
    REFUNDS.with(|r| r.borrow_mut().push((denom.into(), amount)));
  }
}

parameter_types! {
  pub const BridgePalletId: PalletId = PalletId(*b"py/erc20");
}

impl pallet_erc20_bridge::Config for Test {
  type Assets = Assets;
  type Registry = AssetRegistry;
  type Precompiles = MockPrecompiles;
  type Erc20 = MockErc20;
  type AccountCodec = DecimalAccountCodec;
  type ModuleAccounts = ModuleAccounts;
  type AddressMapping = AccountToAddress;
  type Telemetry = MockTelemetry;
  type PalletId = BridgePalletId;
  type AdminOrigin = EnsureRoot<AccountId>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = MockBenchmarkHelper;
}

/// Register a pair through the governance call and return the stored entry
pub fn register_pair(denom: &str, asset_id: u32, owner: TokenOwner) -> TokenPair {
  pallet_asset_registry::Pallet::<Test>::register_token_pair(
    RuntimeOrigin::root(),
    denom.as_bytes().to_vec(),
    asset_id,
    owner,
  )
  .unwrap();
  AssetRegistry::lookup_by_denom(denom.as_bytes()).unwrap()
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<AccountId> for MockBenchmarkHelper {
  fn setup_token_pair(denom: &[u8], owner: TokenOwner) -> DispatchResult {
    AssetRegistry::register_token_pair(RuntimeOrigin::root(), denom.to_vec(), ATOM_ASSET, owner)?;
    if owner == TokenOwner::External {
      let pair = AssetRegistry::lookup_by_denom(denom).ok_or(DispatchError::CannotLookup)?;
      set_token_balance(pair.erc20_address, Erc20Bridge::escrow_address(), u64::MAX as u128);
    }
    Ok(())
  }

  fn fund(who: &AccountId, _denom: &[u8], amount: u128) -> DispatchResult {
    use polkadot_sdk::frame_support::traits::fungibles::Mutate;
    Assets::mint_into(ATOM_ASSET, who, amount).map(|_| ())
  }
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: vec![(ALICE, 1000), (BOB, 1000)],
    dev_accounts: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets: vec![(ATOM_ASSET, ALICE, true, 1), (OSMO_ASSET, ALICE, true, 1)],
    metadata: vec![],
    accounts: vec![
      (ATOM_ASSET, ALICE, INITIAL_COINS),
      (ATOM_ASSET, BOB, INITIAL_COINS),
      (OSMO_ASSET, ALICE, INITIAL_COINS),
    ],
    reserves: vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_erc20_bridge::GenesisConfig::<Test>::default()
    .assimilate_storage(&mut t)
    .unwrap();

  let mut ext = polkadot_sdk::sp_io::TestExternalities::new(t);
  ext.execute_with(|| System::set_block_number(1));
  ext
}
