// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::quota::{QuotaCounter, QuotaState};
use crate::domain::repositories::quota_repository::{utc_clock, Clock, QuotaError, QuotaRepository};
use async_trait::async_trait;
use parking_lot::Mutex;

/// 进程内配额存储，重启即清零
pub struct InMemoryQuotaRepository {
    state: Mutex<Option<QuotaState>>,
    clock: Clock,
}

impl Default for InMemoryQuotaRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryQuotaRepository {
    pub fn new() -> Self {
        Self::with_clock(utc_clock())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            state: Mutex::new(None),
            clock,
        }
    }

    fn current(&self, slot: &mut Option<QuotaState>) -> QuotaState {
        let today = (self.clock)();
        let state = match slot.take() {
            Some(state) => state.rolled_to(today),
            None => QuotaState::fresh(today),
        };
        *slot = Some(state.clone());
        state
    }
}

#[async_trait]
impl QuotaRepository for InMemoryQuotaRepository {
    async fn load(&self) -> Result<QuotaState, QuotaError> {
        let mut slot = self.state.lock();
        Ok(self.current(&mut slot))
    }

    async fn try_increment(&self, counter: QuotaCounter, ceiling: u32) -> Result<bool, QuotaError> {
        let mut slot = self.state.lock();
        let mut state = self.current(&mut slot);
        let incremented = state.increment_below(counter, ceiling);
        *slot = Some(state);
        Ok(incremented)
    }

    async fn reset(&self) -> Result<QuotaState, QuotaError> {
        let state = QuotaState::fresh((self.clock)());
        *self.state.lock() = Some(state.clone());
        Ok(state)
    }
}
