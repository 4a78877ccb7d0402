//! Host harness for driving instruction handlers in unit tests.
//!
//! Syscall stubs stand in for the runtime: the clock, rent and stack height come
//! from thread-local state, System Program transfers and account creation act
//! on the given account infos and the entropy program's `Next` resets the var.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Once;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::entrypoint::ProgramResult;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::program_error::ProgramError;
use anchor_lang::solana_program::program_stubs::{set_syscall_stubs, SyscallStubs};
use anchor_lang::system_program;
use anchor_lang::Bumps;
use bytemuck::Zeroable;
use entropy_api::state::{var_pda, EntropyAccount, Var};

use crate::constants::*;
use crate::instructions::{
    claim, initialize, lottery, new_var, set_invitor, views, place_bet, set_bonus_rate, set_fee_rate, set_fee_receiver, set_trigger_num,
    set_var_address, settle,
};
use crate::state::*;
use crate::utils::read_var;

pub(crate) const START_SLOT: u64 = 100;
pub(crate) const START_TIME: i64 = 1_700_000_000;

const VAR_HEADER_LEN: usize = 8;
const SYSTEM_CREATE_ACCOUNT: u32 = 0;
const SYSTEM_TRANSFER: u32 = 2;
const ENTROPY_NEXT: u8 = 2;

thread_local! {
    static SLOT: Cell<u64> = Cell::new(START_SLOT);
    static UNIX_TIMESTAMP: Cell<i64> = Cell::new(START_TIME);
    static STACK_HEIGHT: Cell<u64> = Cell::new(1);
    static INVOKED: RefCell<Vec<Instruction>> = RefCell::new(Vec::new());
}

struct HostStubs;

impl SyscallStubs for HostStubs {
    fn sol_log(&self, _message: &str) {}

    fn sol_log_data(&self, _fields: &[&[u8]]) {}

    fn sol_get_clock_sysvar(&self, var_addr: *mut u8) -> u64 {
        let clock = Clock {
            slot: SLOT.with(Cell::get),
            unix_timestamp: UNIX_TIMESTAMP.with(Cell::get),
            ..Clock::default()
        };
        unsafe { *(var_addr as *mut Clock) = clock };
        0
    }

    fn sol_get_rent_sysvar(&self, var_addr: *mut u8) -> u64 {
        unsafe { *(var_addr as *mut Rent) = Rent::default() };
        0
    }

    fn sol_get_stack_height(&self) -> u64 {
        STACK_HEIGHT.with(Cell::get)
    }

    fn sol_invoke_signed(
        &self,
        instruction: &Instruction,
        account_infos: &[AccountInfo],
        signers_seeds: &[&[&[u8]]],
    ) -> ProgramResult {
        INVOKED.with(|invoked| invoked.borrow_mut().push(instruction.clone()));

        for meta in instruction.accounts.iter().filter(|meta| meta.is_signer) {
            let signed = signers_seeds.iter().any(|seeds| {
                Pubkey::create_program_address(seeds, &crate::ID).ok() == Some(meta.pubkey)
            });
            let info = find(account_infos, &meta.pubkey)?;
            if !info.is_signer && !signed {
                return Err(ProgramError::MissingRequiredSignature);
            }
        }

        if instruction.program_id == system_program::ID {
            system_instruction(instruction, account_infos)
        } else if instruction.program_id == entropy_api::ID
            && instruction.data.first() == Some(&ENTROPY_NEXT)
        {
            entropy_next(instruction, account_infos)
        } else {
            Ok(())
        }
    }
}

fn find<'a, 'info>(infos: &'a [AccountInfo<'info>], key: &Pubkey) -> std::result::Result<&'a AccountInfo<'info>, ProgramError> {
    infos
        .iter()
        .find(|info| info.key == key)
        .ok_or(ProgramError::NotEnoughAccountKeys)
}

fn system_instruction(instruction: &Instruction, infos: &[AccountInfo]) -> ProgramResult {
    let data = &instruction.data;
    let tag = u32::from_le_bytes(data[..4].try_into().unwrap());
    let lamports = u64::from_le_bytes(data[4..12].try_into().unwrap());

    let from = find(infos, &instruction.accounts[0].pubkey)?;
    let to = find(infos, &instruction.accounts[1].pubkey)?;
    let from_balance = from.lamports().checked_sub(lamports).ok_or(ProgramError::InsufficientFunds)?;

    match tag {
        SYSTEM_TRANSFER => {}
        SYSTEM_CREATE_ACCOUNT => {
            if to.lamports() != 0 || *to.owner != system_program::ID {
                return Err(ProgramError::AccountAlreadyInitialized);
            }
            let space = u64::from_le_bytes(data[12..20].try_into().unwrap()) as usize;
            let owner = Pubkey::try_from(&data[20..52]).unwrap();
            *to.try_borrow_mut_data()? = Box::leak(vec![0u8; space].into_boxed_slice());
            to.assign(&owner);
        }
        _ => panic!("unexpected system instruction {tag}"),
    }

    **from.try_borrow_mut_lamports()? = from_balance;
    **to.try_borrow_mut_lamports()? += lamports;
    Ok(())
}

fn entropy_next(instruction: &Instruction, infos: &[AccountInfo]) -> ProgramResult {
    let end_at = u64::from_le_bytes(instruction.data[1..9].try_into().unwrap());
    let authority = instruction.accounts[0].pubkey;
    let info = find(infos, &instruction.accounts[1].pubkey)?;

    let mut data = info.try_borrow_mut_data()?;
    let body = &mut data[VAR_HEADER_LEN..VAR_HEADER_LEN + std::mem::size_of::<Var>()];
    let mut var: Var = bytemuck::pod_read_unaligned(body);
    if var.authority != authority {
        return Err(ProgramError::IllegalOwner);
    }
    var.slot_hash = [0; 32];
    var.seed = [0; 32];
    var.value = [0; 32];
    var.start_at = SLOT.with(Cell::get);
    var.end_at = end_at;
    body.copy_from_slice(bytemuck::bytes_of(&var));
    Ok(())
}

/// Install the stubs once per test binary.
pub(crate) fn install_stubs() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        set_syscall_stubs(Box::new(HostStubs));
    });
}

pub(crate) fn set_clock(slot: u64, unix_timestamp: i64) {
    SLOT.with(|cell| cell.set(slot));
    UNIX_TIMESTAMP.with(|cell| cell.set(unix_timestamp));
}

/// 1 is a top-level instruction; anything higher runs inside a CPI.
pub(crate) fn set_stack_height(height: u64) {
    STACK_HEIGHT.with(|cell| cell.set(height));
}

pub(crate) fn take_invocations() -> Vec<Instruction> {
    INVOKED.with(|invoked| std::mem::take(&mut *invoked.borrow_mut()))
}

/// A writable account info that lives for the rest of the test binary.
pub(crate) fn leak_account(
    key: Pubkey,
    lamports: u64,
    data: Vec<u8>,
    owner: Pubkey,
    is_signer: bool,
) -> &'static AccountInfo<'static> {
    Box::leak(Box::new(AccountInfo::new(
        Box::leak(Box::new(key)),
        is_signer,
        true,
        Box::leak(Box::new(lamports)),
        Box::leak(data.into_boxed_slice()),
        Box::leak(Box::new(owner)),
        false,
        0,
    )))
}

pub(crate) fn leak_program(id: Pubkey) -> &'static AccountInfo<'static> {
    Box::leak(Box::new(AccountInfo::new(
        Box::leak(Box::new(id)),
        false,
        false,
        Box::leak(Box::new(1)),
        Box::leak(Vec::new().into_boxed_slice()),
        Box::leak(Box::new(Pubkey::default())),
        true,
        0,
    )))
}

/// Serialized account data padded to the allocated length.
pub(crate) fn account_data<T: AccountSerialize>(account: &T, len: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(len);
    account.try_serialize(&mut data).unwrap();
    data.resize(len, 0);
    data
}

pub(crate) fn rent_for(len: usize) -> u64 {
    Rent::default().minimum_balance(len)
}

/// A var whose slot hash was sampled and whose seed was revealed.
pub(crate) fn revealed_var(authority: Pubkey, end_at: u64, value: [u8; 32]) -> Var {
    Var {
        authority,
        end_at,
        samples: 16,
        slot_hash: [1; 32],
        seed: [2; 32],
        value,
        ..Var::zeroed()
    }
}

pub(crate) fn entropy_var_data(var: &Var) -> Vec<u8> {
    let mut data = vec![0u8; VAR_HEADER_LEN];
    data[0] = EntropyAccount::Var as u8;
    data.extend_from_slice(bytemuck::bytes_of(var));
    data
}

/// Run a handler the way the entrypoint does: validate the accounts, call the
/// handler and persist every mutable account.
fn run<T, R, F>(infos: Vec<AccountInfo<'static>>, ix_data: &[u8], handler: F) -> Result<R>
where
    T: Accounts<'static, T::Bumps> + Bumps + AccountsExit<'static>,
    T::Bumps: Default,
    F: FnOnce(Context<'_, '_, '_, 'static, T>) -> Result<R>,
{
    let mut remaining: &'static [AccountInfo<'static>] = Box::leak(infos.into_boxed_slice());
    let mut bumps = T::Bumps::default();
    let mut accounts = T::try_accounts(&crate::ID, &mut remaining, ix_data, &mut bumps, &mut BTreeSet::new())?;
    let value = handler(Context::new(&crate::ID, &mut accounts, &[], bumps))?;
    accounts.exit(&crate::ID)?;
    Ok(value)
}

/// Run `initialize` against fresh config and game PDAs; returns both account infos.
pub(crate) fn initialize(
    signer: &'static AccountInfo<'static>,
    fee_receiver: Pubkey,
    args: initialize::InitializeArgs,
) -> Result<(&'static AccountInfo<'static>, &'static AccountInfo<'static>)> {
    install_stubs();
    let (config_key, _) = Pubkey::find_program_address(&[CONFIG], &crate::ID);
    let (game_key, _) = Pubkey::find_program_address(&[GAME], &crate::ID);
    let config = leak_account(config_key, 0, vec![], system_program::ID, false);
    let game = leak_account(game_key, 0, vec![], system_program::ID, false);
    let fee_receiver = leak_account(fee_receiver, 0, vec![], system_program::ID, false);

    run::<initialize::Initialize<'static>, _, _>(
        vec![
            signer.clone(),
            config.clone(),
            game.clone(),
            fee_receiver.clone(),
            leak_program(system_program::ID).clone(),
        ],
        &[],
        |ctx| initialize::handler(ctx, args),
    )?;
    Ok((config, game))
}

/// An initialized game with a finalized entropy var owned by the game PDA.
pub(crate) struct World {
    pub admin: &'static AccountInfo<'static>,
    pub fee_receiver: Pubkey,
    pub config: &'static AccountInfo<'static>,
    pub game: &'static AccountInfo<'static>,
    pub entropy_var: &'static AccountInfo<'static>,
    pub entropy_program: &'static AccountInfo<'static>,
    pub system_program: &'static AccountInfo<'static>,
    periods: RefCell<BTreeMap<u64, &'static AccountInfo<'static>>>,
    links: RefCell<BTreeMap<Pubkey, &'static AccountInfo<'static>>>,
}

impl World {
    pub fn new(trigger_num: u64) -> World {
        install_stubs();
        set_clock(START_SLOT, START_TIME);
        set_stack_height(1);

        let admin = leak_account(Pubkey::new_unique(), 10_000_000_000, vec![], system_program::ID, true);
        let fee_receiver = Pubkey::new_unique();
        let (config_key, _) = Pubkey::find_program_address(&[CONFIG], &crate::ID);
        let (game_key, _) = Pubkey::find_program_address(&[GAME], &crate::ID);
        let (var_key, _) = var_pda(game_key, 0);

        let mut config = Config::default();
        config
            .init(*admin.key, fee_receiver, DEFAULT_FEE_RATE, DEFAULT_BONUS_RATE, trigger_num)
            .unwrap();
        config.set_var_address(var_key).unwrap();

        World {
            admin,
            fee_receiver,
            config: leak_account(config_key, rent_for(Config::LEN), account_data(&config, Config::LEN), crate::ID, false),
            game: leak_account(game_key, rent_for(Game::LEN), account_data(&Game::default(), Game::LEN), crate::ID, false),
            entropy_var: leak_account(
                var_key,
                1_000_000,
                entropy_var_data(&revealed_var(game_key, START_SLOT - 10, [9; 32])),
                entropy_api::ID,
                false,
            ),
            entropy_program: leak_program(entropy_api::ID),
            system_program: leak_program(system_program::ID),
            periods: RefCell::new(BTreeMap::new()),
            links: RefCell::new(BTreeMap::new()),
        }
    }

    /// The period PDA for `id`, allocated empty on first use.
    pub fn period(&self, id: u64) -> &'static AccountInfo<'static> {
        *self.periods.borrow_mut().entry(id).or_insert_with(|| {
            let (key, _) = Pubkey::find_program_address(&[PERIOD, &id.to_le_bytes()], &crate::ID);
            leak_account(key, rent_for(Period::LEN), account_data(&Period::default(), Period::LEN), crate::ID, false)
        })
    }

    /// The invitor link PDA of `participant`, not created until `set_invitor`.
    pub fn invitor_link(&self, participant: &Pubkey) -> &'static AccountInfo<'static> {
        *self.links.borrow_mut().entry(*participant).or_insert_with(|| {
            let (key, _) = Pubkey::find_program_address(&[INVITOR, participant.as_ref()], &crate::ID);
            leak_account(key, 0, vec![], system_program::ID, false)
        })
    }

    pub fn wallet(&self, lamports: u64) -> &'static AccountInfo<'static> {
        leak_account(Pubkey::new_unique(), lamports, vec![], system_program::ID, true)
    }

    pub fn impostor(&self) -> &'static AccountInfo<'static> {
        self.wallet(10_000_000_000)
    }

    pub fn load_config(&self) -> Config {
        Config::try_deserialize(&mut &self.config.try_borrow_data().unwrap()[..]).unwrap()
    }

    pub fn load_game(&self) -> Game {
        Game::try_deserialize(&mut &self.game.try_borrow_data().unwrap()[..]).unwrap()
    }

    pub fn load_period(&self, id: u64) -> Period {
        let info = self.period(id);
        let data = info.try_borrow_data().unwrap();
        Period::try_deserialize(&mut &data[..]).unwrap()
    }

    pub fn load_var(&self) -> Var {
        read_var(self.entropy_var).unwrap()
    }

    pub fn write_var(&self, var: &Var) {
        let mut data = self.entropy_var.try_borrow_mut_data().unwrap();
        data.copy_from_slice(&entropy_var_data(var));
    }

    /// The provider samples the slot hash and reveals its seed.
    pub fn reveal(&self, value: [u8; 32]) {
        let mut var = self.load_var();
        var.slot_hash = [1; 32];
        var.seed = [2; 32];
        var.value = value;
        self.write_var(&var);
    }

    pub fn place_bet(&self, bettor: &'static AccountInfo<'static>, is_odd: bool, amount: u64) -> Result<()> {
        let id = self.load_game().period;
        let link = self.invitor_link(bettor.key);
        run::<place_bet::PlaceBet<'static>, _, _>(
            vec![
                bettor.clone(),
                self.config.clone(),
                self.game.clone(),
                self.period(id).clone(),
                link.clone(),
                self.entropy_var.clone(),
                self.entropy_program.clone(),
                self.system_program.clone(),
            ],
            &[],
            |ctx| place_bet::handler(ctx, is_odd, amount),
        )
    }

    pub fn set_invitor(&self, participant: &'static AccountInfo<'static>, invitor: Pubkey) -> Result<()> {
        run::<set_invitor::SetInvitor<'static>, _, _>(
            vec![
                participant.clone(),
                self.invitor_link(participant.key).clone(),
                self.system_program.clone(),
            ],
            &[],
            |ctx| set_invitor::handler(ctx, invitor),
        )
    }

    pub fn lottery(&self, signer: &'static AccountInfo<'static>) -> Result<()> {
        let id = self.load_game().period;
        run::<lottery::Lottery<'static>, _, _>(
            vec![
                signer.clone(),
                self.config.clone(),
                self.game.clone(),
                self.period(id).clone(),
                self.entropy_var.clone(),
                self.entropy_program.clone(),
                self.system_program.clone(),
            ],
            &[],
            |ctx| lottery::handler(ctx),
        )
    }

    pub fn settle(&self) -> Result<()> {
        let id = self.load_game().period;
        run::<settle::Settle<'static>, _, _>(
            vec![
                self.wallet(0).clone(),
                self.config.clone(),
                self.game.clone(),
                self.period(id).clone(),
                self.entropy_var.clone(),
            ],
            &[],
            |ctx| settle::handler(ctx),
        )
    }

    pub fn claim(&self, owner: &'static AccountInfo<'static>, period_id: u64) -> Result<()> {
        run::<claim::Claim<'static>, _, _>(
            vec![owner.clone(), self.period(period_id).clone(), self.system_program.clone()],
            &period_id.to_le_bytes(),
            |ctx| claim::handler(ctx, period_id),
        )
    }

    pub fn set_fee_rate(&self, signer: &'static AccountInfo<'static>, rate: u64) -> Result<()> {
        run::<set_fee_rate::SetFeeRate<'static>, _, _>(
            vec![signer.clone(), self.config.clone()],
            &[],
            |ctx| set_fee_rate::handler(ctx, set_fee_rate::SetFeeRateArgs { rate }),
        )
    }

    pub fn set_bonus_rate(&self, signer: &'static AccountInfo<'static>, rate: u64) -> Result<()> {
        run::<set_bonus_rate::SetBonusRate<'static>, _, _>(
            vec![signer.clone(), self.config.clone()],
            &[],
            |ctx| set_bonus_rate::handler(ctx, set_bonus_rate::SetBonusRateArgs { rate }),
        )
    }

    pub fn set_fee_receiver(&self, signer: &'static AccountInfo<'static>, receiver: Pubkey) -> Result<()> {
        run::<set_fee_receiver::SetFeeReceiver<'static>, _, _>(
            vec![signer.clone(), self.config.clone()],
            &[],
            |ctx| {
                set_fee_receiver::handler(
                    ctx,
                    set_fee_receiver::SetFeeReceiverArgs {
                        new_fee_receiver: receiver,
                    },
                )
            },
        )
    }

    pub fn set_trigger_num(&self, signer: &'static AccountInfo<'static>, num: u64) -> Result<()> {
        run::<set_trigger_num::SetTriggerNum<'static>, _, _>(
            vec![signer.clone(), self.config.clone()],
            &[],
            |ctx| set_trigger_num::handler(ctx, set_trigger_num::SetTriggerNumArgs { num }),
        )
    }

    pub fn set_var_address(&self, signer: &'static AccountInfo<'static>, var: &'static AccountInfo<'static>) -> Result<()> {
        run::<set_var_address::SetVarAddress<'static>, _, _>(
            vec![signer.clone(), self.config.clone(), self.game.clone(), var.clone()],
            &[],
            |ctx| set_var_address::handler(ctx),
        )
    }

    pub fn new_var(&self, signer: &'static AccountInfo<'static>, args: new_var::NewVarArgs) -> Result<()> {
        let (var, _) = var_pda(*self.game.key, args.id);
        let var = leak_account(var, 0, vec![], system_program::ID, false);
        let provider = leak_account(Pubkey::new_unique(), 0, vec![], system_program::ID, false);
        let ix_data = args.try_to_vec().unwrap();
        run::<new_var::NewVar<'static>, _, _>(
            vec![
                signer.clone(),
                self.config.clone(),
                self.game.clone(),
                provider.clone(),
                var.clone(),
                self.entropy_program.clone(),
                self.system_program.clone(),
            ],
            &ix_data,
            |ctx| new_var::handler(ctx, args),
        )
    }

    fn read_period<R>(&self, handler: impl FnOnce(Context<'_, '_, '_, 'static, views::ReadPeriod<'static>>) -> Result<R>) -> Result<R> {
        let id = self.load_game().period;
        run::<views::ReadPeriod<'static>, _, _>(vec![self.game.clone(), self.period(id).clone()], &[], handler)
    }

    pub fn bet_table(&self, participant: Pubkey) -> Result<u64> {
        self.read_period(|ctx| views::bet_table(ctx, participant))
    }

    pub fn print_bet_amount(&self) -> Result<BetAmount> {
        self.read_period(|ctx| views::print_bet_amount(ctx))
    }

    pub fn print_bet_table(&self, is_odd: bool) -> Result<Vec<BetTableEntry>> {
        self.read_period(|ctx| views::print_bet_table(ctx, is_odd))
    }

    pub fn current_period(&self) -> Result<u64> {
        run::<views::ReadGame<'static>, _, _>(vec![self.game.clone()], &[], |ctx| views::period(ctx))
    }

    pub fn invitor_map(&self, participant: Pubkey) -> Result<Pubkey> {
        run::<views::ReadInvitor<'static>, _, _>(
            vec![self.invitor_link(&participant).clone()],
            participant.as_ref(),
            |ctx| views::invitor_map(ctx, participant),
        )
    }

    pub fn read_config<R>(&self, handler: impl FnOnce(Context<'_, '_, '_, 'static, views::ReadConfig<'static>>) -> Result<R>) -> Result<R> {
        run::<views::ReadConfig<'static>, _, _>(vec![self.config.clone()], &[], handler)
    }
}
