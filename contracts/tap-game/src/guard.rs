use soroban_sdk::Env;

use crate::types::DataKey;
use crate::Error;

/// Call-scoped reentrancy lock.
///
/// Acquired at the top of every entry point that moves value. A nested call
/// into this contract made while the lock is held fails with `Reentrant`.
/// The flag is cleared when the guard drops, on every exit path; an `Err`
/// return additionally rolls back the flag write itself.
pub(crate) struct ReentrancyGuard<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyGuard<'a> {
    pub(crate) fn acquire(env: &'a Env) -> Result<Self, Error> {
        if env.storage().instance().has(&DataKey::Locked) {
            return Err(Error::Reentrant);
        }
        env.storage().instance().set(&DataKey::Locked, &true);
        Ok(ReentrancyGuard { env })
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&DataKey::Locked);
    }
}
