//! Bounded map of previously visited states.
//!
//! States are bucketed by a 64-bit key (raw or canonical hash). A bucket
//! may hold several generation indices; a key hit is only a candidate and
//! callers confirm it against the stored state. States are kept in a FIFO
//! window so the oldest can be evicted when capacity is reached.

use std::collections::VecDeque;
use std::sync::Arc;

use indexmap::IndexMap;
use ndlife_space::SparseState;
use smallvec::SmallVec;

pub(crate) struct SeenStates {
    by_key: IndexMap<u64, SmallVec<[u64; 2]>>,
    window: VecDeque<(u64, Arc<SparseState>)>,
    /// Generation index of `window[0]`.
    first_index: u64,
    capacity: usize,
}

impl SeenStates {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            by_key: IndexMap::new(),
            window: VecDeque::new(),
            first_index: 0,
            capacity,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.window.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.window.len() >= self.capacity
    }

    /// First remembered generation under `key` for which `confirm`
    /// accepts the stored state, with the value `confirm` produced.
    pub(crate) fn find<T>(
        &self,
        key: u64,
        mut confirm: impl FnMut(&SparseState) -> Option<T>,
    ) -> Option<(u64, T)> {
        let chain = self.by_key.get(&key)?;
        chain.iter().find_map(|&index| {
            let state = self.get(index)?;
            confirm(state).map(|v| (index, v))
        })
    }

    /// Remember `state` as generation `index`. Indices must be inserted
    /// consecutively; capacity is the caller's concern.
    pub(crate) fn insert(&mut self, index: u64, key: u64, state: Arc<SparseState>) {
        if self.window.is_empty() {
            self.first_index = index;
        }
        debug_assert_eq!(index, self.first_index + self.window.len() as u64);
        self.by_key.entry(key).or_default().push(index);
        self.window.push_back((key, state));
    }

    /// Forget the oldest remembered generation. Returns its index.
    pub(crate) fn evict_oldest(&mut self) -> Option<u64> {
        let (key, _) = self.window.pop_front()?;
        let index = self.first_index;
        self.first_index += 1;
        if let Some(chain) = self.by_key.get_mut(&key) {
            chain.retain(|i| *i != index);
            if chain.is_empty() {
                self.by_key.swap_remove(&key);
            }
        }
        Some(index)
    }

    fn get(&self, index: u64) -> Option<&SparseState> {
        let offset = usize::try_from(index.checked_sub(self.first_index)?).ok()?;
        self.window.get(offset).map(|(_, s)| s.as_ref())
    }
}
