use soroban_sdk::{symbol_short, Env, Symbol};

use crate::errors::ContractError;

const LOCKED: Symbol = symbol_short!("LOCKED");

/// Run `op` while holding the ledger's operation lock.
///
/// Token transfers call into other contracts; if one of them calls back into
/// this ledger before `op` returns, the nested call fails with `Reentrant`.
/// An `Err` from `op` rolls back the lock write with everything else.
pub fn non_reentrant<T>(
    env: &Env,
    op: impl FnOnce() -> Result<T, ContractError>,
) -> Result<T, ContractError> {
    if env.storage().instance().get(&LOCKED).unwrap_or(false) {
        return Err(ContractError::Reentrant);
    }
    env.storage().instance().set(&LOCKED, &true);
    let result = op();
    env.storage().instance().remove(&LOCKED);
    result
}
