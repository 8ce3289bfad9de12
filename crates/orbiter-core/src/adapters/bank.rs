//! In-memory balance ledger.

use crate::ports::outbound::BankKeeper;
use parking_lot::RwLock;
use primitive_types::U256;
use shared_types::{Coin, OrbiterError};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

type Balances = HashMap<String, BTreeMap<String, U256>>;

/// Balance ledger kept in memory.
#[derive(Default)]
pub struct InMemoryBank {
    balances: RwLock<Balances>,
}

impl InMemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `coin` to `account` out of thin air.
    pub fn mint(&self, account: &str, coin: &Coin) -> Result<(), OrbiterError> {
        coin.validate()?;
        let mut balances = self.balances.write();
        let entry = balances
            .entry(account.to_string())
            .or_default()
            .entry(coin.denom.clone())
            .or_insert_with(U256::zero);
        *entry = entry
            .checked_add(coin.amount)
            .ok_or_else(|| OrbiterError::Overflow(format!("balance of {}", account)))?;
        Ok(())
    }
}

fn debit(balances: &mut Balances, account: &str, coin: &Coin) -> Result<(), OrbiterError> {
    let available = balances
        .get(account)
        .and_then(|b| b.get(&coin.denom))
        .copied()
        .unwrap_or_default();
    if available < coin.amount {
        return Err(OrbiterError::InsufficientFunds {
            account: account.to_string(),
            required: coin.to_string(),
            available: Coin::new(coin.denom.clone(), available).to_string(),
        });
    }
    let remaining = available - coin.amount;
    if let Some(account_balances) = balances.get_mut(account) {
        if remaining.is_zero() {
            account_balances.remove(&coin.denom);
        } else {
            account_balances.insert(coin.denom.clone(), remaining);
        }
    }
    Ok(())
}

fn credit(balances: &mut Balances, account: &str, coin: &Coin) -> Result<(), OrbiterError> {
    let entry = balances
        .entry(account.to_string())
        .or_default()
        .entry(coin.denom.clone())
        .or_insert_with(U256::zero);
    *entry = entry
        .checked_add(coin.amount)
        .ok_or_else(|| OrbiterError::Overflow(format!("balance of {}", account)))?;
    Ok(())
}

impl BankKeeper for InMemoryBank {
    fn get_balance(&self, account: &str, denom: &str) -> Result<U256, OrbiterError> {
        Ok(self
            .balances
            .read()
            .get(account)
            .and_then(|b| b.get(denom))
            .copied()
            .unwrap_or_default())
    }

    fn get_all_balances(&self, account: &str) -> Result<Vec<Coin>, OrbiterError> {
        Ok(self
            .balances
            .read()
            .get(account)
            .map(|b| {
                b.iter()
                    .filter(|(_, amount)| !amount.is_zero())
                    .map(|(denom, amount)| Coin::new(denom.clone(), *amount))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn send_coins(&self, from: &str, to: &str, coins: &[Coin]) -> Result<(), OrbiterError> {
        for coin in coins {
            coin.validate()?;
        }
        let mut balances = self.balances.write();
        // Work on a copy so a failure midway leaves the ledger untouched.
        let mut staged = balances.clone();
        for coin in coins.iter().filter(|c| !c.is_zero()) {
            debit(&mut staged, from, coin)?;
            credit(&mut staged, to, coin)?;
        }
        *balances = staged;
        debug!("[orbiter:bank] sent {} coin(s) from {} to {}", coins.len(), from, to);
        Ok(())
    }
}
