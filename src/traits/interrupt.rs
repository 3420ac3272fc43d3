// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tokio_util::sync::CancellationToken;

/// Cooperative cancellation check polled between update chunks.
pub trait InterruptCheck {
    fn is_interrupted(&self) -> bool;

    /// Clear a consumed request so the next update starts fresh.
    fn reset(&mut self) {}
}

impl InterruptCheck for CancellationToken {
    fn is_interrupted(&self) -> bool {
        self.is_cancelled()
    }
}

/// Never requests cancellation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverInterrupt;

impl InterruptCheck for NeverInterrupt {
    fn is_interrupted(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_reports_cancellation_from_clone() {
        let token = CancellationToken::new();
        let handle = token.clone();
        assert!(!token.is_interrupted());

        handle.cancel();
        assert!(token.is_interrupted());
        assert!(!NeverInterrupt.is_interrupted());
    }
}
