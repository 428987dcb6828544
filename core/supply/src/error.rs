// citrate/core/supply/src/error.rs

use citrate_primitives::{CoinError, Coins};
use std::fmt;
use thiserror::Error;

/// Supply record field (or reconstructed quantity) that a check compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplyField {
    CirculatingSupply,
    ModulesSupply,
    InitialVestingSupply,
    TotalSupply,
}

impl SupplyField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyField::CirculatingSupply => "circulating_supply",
            SupplyField::ModulesSupply => "modules_supply",
            SupplyField::InitialVestingSupply => "initial_vesting_supply",
            SupplyField::TotalSupply => "total_supply",
        }
    }

    /// Label for the independently computed side of the comparison
    fn computed_label(&self) -> &'static str {
        match self {
            SupplyField::CirculatingSupply => "sum of circulating tokens",
            SupplyField::ModulesSupply => "sum of module account tokens",
            SupplyField::InitialVestingSupply => "sum of still-vesting tokens",
            SupplyField::TotalSupply => "calculated total supply",
        }
    }
}

impl fmt::Display for SupplyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diverging field: what the supplier record says versus what was computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub field: SupplyField,
    pub recorded: Coins,
    pub computed: Coins,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\n\tsupplier.{}: {}\n\t{}: {}",
            self.field,
            self.recorded,
            self.field.computed_label(),
            self.computed
        )
    }
}

/// External subsystem a snapshot reading comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collaborator {
    Accounts,
    Supplier,
    Staking,
    FeeCollector,
    CommunityPool,
    OutstandingRewards,
    BlockHeader,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collaborator::Accounts => "accounts",
            Collaborator::Supplier => "supplier",
            Collaborator::Staking => "staking",
            Collaborator::FeeCollector => "fee collector",
            Collaborator::CommunityPool => "community pool",
            Collaborator::OutstandingRewards => "outstanding rewards",
            Collaborator::BlockHeader => "block header",
        };
        f.write_str(name)
    }
}

fn join_mismatches(mismatches: &[FieldMismatch]) -> String {
    mismatches.iter().map(ToString::to_string).collect()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupplyError {
    #[error("{route} invariance broken:{}", join_mismatches(.mismatches))]
    InvariantViolation {
        route: &'static str,
        mismatches: Vec<FieldMismatch>,
    },

    #[error("{collaborator} unavailable: {reason}")]
    CollaboratorUnavailable {
        collaborator: Collaborator,
        reason: String,
    },

    #[error("Coin arithmetic failed: {0}")]
    Coin(#[from] CoinError),

    #[error("Invariant route already registered: {0}")]
    DuplicateRoute(String),

    #[error("Unknown invariant route: {0}")]
    UnknownRoute(String),
}

impl SupplyError {
    pub fn unavailable(collaborator: Collaborator, reason: impl Into<String>) -> Self {
        SupplyError::CollaboratorUnavailable {
            collaborator,
            reason: reason.into(),
        }
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, SupplyError::InvariantViolation { .. })
    }

    /// Mismatched fields carried by a violation, empty for other errors
    pub fn mismatches(&self) -> &[FieldMismatch] {
        match self {
            SupplyError::InvariantViolation { mismatches, .. } => mismatches,
            _ => &[],
        }
    }
}
