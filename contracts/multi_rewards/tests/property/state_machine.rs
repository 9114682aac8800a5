//! Property-based state machine tests for the ledger.
//!
//! Random sequences of deposits, withdrawals, claims, weight changes and
//! clock advances are applied to a two-pool, one-stream ledger.
//!
//! Invariants tested after every step:
//! - No `(reward, pool)` index ever decreases
//! - Each pool's `total_staked` equals the sum of its users' stakes
//! - A rejected withdrawal leaves every balance untouched
//! - Ledger-held stake tokens equal the sum of all pool totals

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::{vec, Address, U256};

use multi_rewards::ContractError;

use crate::common::Harness;

const USERS: usize = 3;
const MINTED: i128 = 10_000_000;

#[derive(Arbitrary, Clone, Debug)]
enum Action {
    Deposit { user: u8, pool: bool, amount: u16 },
    Withdraw { user: u8, pool: bool, amount: u16 },
    Claim { user: u8 },
    Advance { seconds: u8 },
    Reweight { first: u8, second: u8 },
}

struct Model {
    h: Harness,
    pools: [u64; 2],
    reward: u64,
    users: [Address; USERS],
    indices: [U256; 2],
}

impl Model {
    fn new() -> Self {
        let h = Harness::new();
        let pools = [h.pool(), h.pool()];
        let reward = h.reward(1_000_000, 10, 500, &pools, &[1, 1]);
        let users = [h.staker(MINTED), h.staker(MINTED), h.staker(MINTED)];
        let indices = [
            h.client.get_reward_pool(&reward, &pools[0]).index,
            h.client.get_reward_pool(&reward, &pools[1]).index,
        ];
        Self {
            h,
            pools,
            reward,
            users,
            indices,
        }
    }

    fn pool(&self, second: bool) -> u64 {
        self.pools[usize::from(second)]
    }

    fn user(&self, n: u8) -> &Address {
        &self.users[usize::from(n) % USERS]
    }

    fn check(&mut self) -> Result<(), TestCaseError> {
        let mut staked_total = 0i128;
        for (slot, pool_id) in self.pools.iter().enumerate() {
            let index = self.h.client.get_reward_pool(&self.reward, pool_id).index;
            prop_assert!(index >= self.indices[slot], "index decreased on pool {}", pool_id);
            self.indices[slot] = index;

            let pool = self.h.client.get_pool(pool_id);
            let sum: i128 = self
                .users
                .iter()
                .map(|u| self.h.client.get_stake(pool_id, u))
                .sum();
            prop_assert_eq!(pool.total_staked, sum);
            staked_total += pool.total_staked;
        }
        prop_assert_eq!(self.h.stake_balance(&self.h.client.address), staked_total);
        Ok(())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_random_operations_keep_ledger_consistent(
        actions in proptest::collection::vec(any::<Action>(), 1..40),
    ) {
        let mut m = Model::new();

        for action in actions {
            match action {
                Action::Deposit { user, pool, amount } => {
                    let who = m.user(user).clone();
                    let result = m.h.client.try_deposit(&who, &m.pool(pool), &i128::from(amount));
                    if amount == 0 {
                        prop_assert!(matches!(result, Err(Ok(ContractError::InvalidAmount))), "{:?}", result);
                    } else {
                        prop_assert!(result.is_ok());
                    }
                }
                Action::Withdraw { user, pool, amount } => {
                    let who = m.user(user).clone();
                    let pool_id = m.pool(pool);
                    let staked = m.h.client.get_stake(&pool_id, &who);
                    let wallet = m.h.stake_balance(&who);
                    let result = m.h.client.try_withdraw(&who, &pool_id, &i128::from(amount));
                    if amount == 0 {
                        prop_assert!(matches!(result, Err(Ok(ContractError::InvalidAmount))), "{:?}", result);
                    } else if i128::from(amount) > staked {
                        prop_assert!(matches!(result, Err(Ok(ContractError::InsufficientStake))), "{:?}", result);
                        prop_assert_eq!(m.h.client.get_stake(&pool_id, &who), staked);
                        prop_assert_eq!(m.h.stake_balance(&who), wallet);
                    } else {
                        prop_assert!(result.is_ok());
                        prop_assert_eq!(m.h.stake_balance(&who), wallet + i128::from(amount));
                    }
                }
                Action::Claim { user } => {
                    let who = m.user(user).clone();
                    let before = m.h.reward_balance(&who);
                    let paid = m.h.client.claim(&who, &vec![&m.h.env, m.pools[0], m.pools[1]]);
                    prop_assert!(paid >= 0);
                    prop_assert_eq!(m.h.reward_balance(&who), before + paid);
                }
                Action::Advance { seconds } => {
                    m.h.at(m.h.now() + u64::from(seconds));
                }
                Action::Reweight { first, second } => {
                    let weights = vec![&m.h.env, u32::from(first), u32::from(second)];
                    let result = m.h.client.try_update_weights(&m.h.admin, &m.reward, &weights);
                    if m.h.now() >= 500 {
                        prop_assert!(matches!(result, Err(Ok(ContractError::RewardEnded))), "{:?}", result);
                    } else if first == 0 && second == 0 {
                        prop_assert!(matches!(result, Err(Ok(ContractError::InvalidWeights))), "{:?}", result);
                    } else {
                        prop_assert!(result.is_ok());
                    }
                }
            }
            m.check()?;
        }
    }
}
