// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-flight guard for one class of async operation.

/// Lifecycle of the most recent request of one class.
///
/// `K` names what was requested (a `GeneratorType` for assists, `()` for
/// exports).  Only `Pending` blocks a new request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState<K> {
    #[default]
    Idle,
    Pending(K),
    Succeeded(K),
    Failed(K),
}

impl<K: Copy + PartialEq> RequestState<K> {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The request in flight, if any.
    pub fn pending(&self) -> Option<K> {
        match self {
            Self::Pending(k) => Some(*k),
            _ => None,
        }
    }

    /// Whether `kind` specifically is the request in flight.
    pub fn is_pending(&self, kind: K) -> bool {
        self.pending() == Some(kind)
    }

    /// Move a pending request to its outcome.  Returns `false` (and leaves
    /// the state alone) when nothing was pending.
    pub fn settle(&mut self, succeeded: bool) -> bool {
        let Some(kind) = self.pending() else {
            return false;
        };
        *self = if succeeded {
            Self::Succeeded(kind)
        } else {
            Self::Failed(kind)
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_is_busy() {
        assert!(!RequestState::<u8>::Idle.is_busy());
        assert!(RequestState::Pending(1u8).is_busy());
        assert!(!RequestState::Succeeded(1u8).is_busy());
        assert!(!RequestState::Failed(1u8).is_busy());
    }

    #[test]
    fn settle_records_the_kind() {
        let mut state = RequestState::Pending('h');
        assert!(state.settle(false));
        assert_eq!(state, RequestState::Failed('h'));
        assert!(!state.settle(true));
        assert_eq!(state, RequestState::Failed('h'));
    }
}
