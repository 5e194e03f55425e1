#![no_std]

mod storage;
mod types;


use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env};
pub use types::{Funder, VaultError};

#[contract]
pub struct Vault;

#[contractimpl]
impl Vault {
    /// Initialize the vault with the token contract it holds deposits in.
    pub fn __constructor(env: Env, token: Address) {
        storage::set_token(&env, &token);
    }

    /// Deposit `amount` of the custody token.
    ///
    /// The first deposit from an address assigns it the next sequential id.
    /// Returns the caller's updated record.
    pub fn deposit(env: Env, caller: Address, amount: i128) -> Result<Funder, VaultError> {
        caller.require_auth();
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }

        let token_client = token::Client::new(&env, &storage::get_token(&env));
        token_client.transfer(&caller, &env.current_contract_address(), &amount);

        let (id, mut funder) = match storage::get_id(&env, &caller) {
            Some(id) => (id, storage::load_funder(&env, id)),
            None => storage::register_depositor(&env, &caller),
        };
        funder.amount += amount;
        storage::set_funder(&env, id, &funder);

        env.events()
            .publish((symbol_short!("DEPOSIT"), caller), amount);

        Ok(funder)
    }

    /// Withdraw `amount` back to the caller.
    ///
    /// Fails with `UserNotFound` if the caller never deposited and with
    /// `InsufficientBalance` if `amount` exceeds the recorded balance.
    pub fn withdraw(env: Env, caller: Address, amount: i128) -> Result<Funder, VaultError> {
        caller.require_auth();

        let id = storage::get_id(&env, &caller).ok_or(VaultError::UserNotFound)?;
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let mut funder = storage::load_funder(&env, id);
        if amount > funder.amount {
            return Err(VaultError::InsufficientBalance);
        }

        funder.amount -= amount;
        storage::set_funder(&env, id, &funder);

        let token_client = token::Client::new(&env, &storage::get_token(&env));
        token_client.transfer(&env.current_contract_address(), &caller, &amount);

        env.events()
            .publish((symbol_short!("WITHDRAW"), caller), amount);

        Ok(funder)
    }

    /// Sequential id of `depositor`, or None if it never deposited.
    pub fn id(env: Env, depositor: Address) -> Option<u32> {
        storage::get_id(&env, &depositor)
    }

    /// Current record for `id`, or None if the id was never assigned.
    pub fn funder(env: Env, id: u32) -> Option<Funder> {
        storage::get_funder(&env, id)
    }

    /// The two depositors with the largest current amounts, richest first.
    ///
    /// Ties go to the depositor that registered first.
    pub fn top2(env: Env) -> Result<(Address, Address), VaultError> {
        let count = storage::get_depositor_count(&env);
        if count < 2 {
            return Err(VaultError::NotEnoughDepositors);
        }

        let mut richest: Option<Funder> = None;
        let mut second: Option<Funder> = None;
        for id in 1..=count {
            let Some(funder) = storage::get_funder(&env, id) else {
                continue;
            };
            if richest.as_ref().map_or(true, |r| funder.amount > r.amount) {
                second = richest.take();
                richest = Some(funder);
            } else if second.as_ref().map_or(true, |s| funder.amount > s.amount) {
                second = Some(funder);
            }
        }

        match (richest, second) {
            (Some(r), Some(s)) => Ok((r.depositor, s.depositor)),
            _ => Err(VaultError::NotEnoughDepositors),
        }
    }

    pub fn depositor_count(env: Env) -> u32 {
        storage::get_depositor_count(&env)
    }

    /// Address of the custody token contract.
    pub fn token(env: Env) -> Address {
        storage::get_token(&env)
    }
}
