//! Command vocabulary shared by the dispatch plane and the audit trail.
//!
//! The spellings produced by [`CommandKind::as_str`] are part of two external
//! contracts at once: they form the first field of the backend line protocol
//! and the `command` field of audit records.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CommandKind
// ---------------------------------------------------------------------------

/// Every command the dispatch plane accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    Add,
    Quote,
    Buy,
    CommitBuy,
    CancelBuy,
    Sell,
    CommitSell,
    CancelSell,
    SetBuyAmount,
    CancelSetBuy,
    SetBuyTrigger,
    SetSellAmount,
    SetSellTrigger,
    CancelSetSell,
    Dumplog,
    DisplaySummary,
    Login,
}

impl CommandKind {
    /// Canonical upper-case spelling used on the wire and in audit records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Quote => "QUOTE",
            Self::Buy => "BUY",
            Self::CommitBuy => "COMMIT_BUY",
            Self::CancelBuy => "CANCEL_BUY",
            Self::Sell => "SELL",
            Self::CommitSell => "COMMIT_SELL",
            Self::CancelSell => "CANCEL_SELL",
            Self::SetBuyAmount => "SET_BUY_AMOUNT",
            Self::CancelSetBuy => "CANCEL_SET_BUY",
            Self::SetBuyTrigger => "SET_BUY_TRIGGER",
            Self::SetSellAmount => "SET_SELL_AMOUNT",
            Self::SetSellTrigger => "SET_SELL_TRIGGER",
            Self::CancelSetSell => "CANCEL_SET_SELL",
            Self::Dumplog => "DUMPLOG",
            Self::DisplaySummary => "DISPLAY_SUMMARY",
            Self::Login => "LOGIN",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OrderKind
// ---------------------------------------------------------------------------

/// The two sides of a pending order, with their lifecycle command spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    Buy,
    Sell,
}

impl OrderKind {
    /// The command that places an intent of this kind.
    #[must_use]
    pub fn place_command(self) -> CommandKind {
        match self {
            Self::Buy => CommandKind::Buy,
            Self::Sell => CommandKind::Sell,
        }
    }

    /// The command that commits the head intent of this kind.
    #[must_use]
    pub fn commit_command(self) -> CommandKind {
        match self {
            Self::Buy => CommandKind::CommitBuy,
            Self::Sell => CommandKind::CommitSell,
        }
    }

    /// The command that cancels the head intent of this kind.
    #[must_use]
    pub fn cancel_command(self) -> CommandKind {
        match self {
            Self::Buy => CommandKind::CancelBuy,
            Self::Sell => CommandKind::CancelSell,
        }
    }

    /// Lower-case noun for human-readable messages ("buy" / "sell").
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// The exact failure text returned when a commit finds the head intent
    /// expired. The wording is asymmetric between sides; both strings are
    /// asserted by the replay harness and must not be "fixed".
    #[must_use]
    pub fn expiry_message(self) -> &'static str {
        match self {
            Self::Buy => "Time elapsed on most recent buy request",
            Self::Sell => "Time elapsed on most recent sell",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}
