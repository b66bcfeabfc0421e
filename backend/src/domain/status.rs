//! Resource status enumerations and the shared lifecycle state machine.
//!
//! Each resource type owns an independent machine over its status
//! enumeration. The machines differ only in configuration, not in code:
//! bookings and retail orders validate enum membership alone, while
//! restaurant orders enforce a transition table. A transition to the current
//! status is an idempotent success for every machine.

use serde::{Deserialize, Serialize};

/// Booking lifecycle states. Initial state is `PENDING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Awaiting confirmation.
    Pending,
    /// Confirmed by staff.
    Confirmed,
    /// Customer has arrived.
    Arrived,
    /// Visit completed.
    Done,
    /// Cancelled.
    Cancelled,
}

impl BookingStatus {
    /// Canonical wire/storage identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Arrived => "ARRIVED",
            Self::Done => "DONE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "ARRIVED" => Ok(Self::Arrived),
            "DONE" => Ok(Self::Done),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Fulfilment lifecycle states shared by retail and restaurant orders.
/// Initial state is `PENDING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfilmentStatus {
    /// Order received.
    Pending,
    /// Being prepared.
    InProgress,
    /// Ready for pickup or service.
    Ready,
    /// Handed over.
    Delivered,
    /// Cancelled.
    Cancelled,
}

impl FulfilmentStatus {
    /// Canonical wire/storage identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for FulfilmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FulfilmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "READY" => Ok(Self::Ready),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Error for status identifiers outside a resource's enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status value: {value}")]
pub struct UnknownStatus {
    /// The rejected identifier.
    pub value: String,
}

/// Error for an in-enumeration transition the machine's table forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal status transition from {from} to {to}")]
pub struct IllegalTransition<S>
where
    S: std::fmt::Display + std::fmt::Debug,
{
    /// Current persisted status.
    pub from: S,
    /// Requested target status.
    pub to: S,
}

/// Per-resource transition configuration for [`StatusMachine`].
#[derive(Debug, Clone, Copy)]
pub enum TransitionRules<S: 'static> {
    /// Any member of the enumeration is reachable from any other.
    AnyMember,
    /// Only the listed `(from, targets)` pairs are legal; states absent
    /// from the table are terminal.
    Table(&'static [(S, &'static [S])]),
}

/// Shared finite state machine over a status enumeration.
///
/// The machine is pure configuration: resources differ by initial state and
/// [`TransitionRules`], never by separate validation code paths.
#[derive(Debug, Clone, Copy)]
pub struct StatusMachine<S: 'static> {
    initial: S,
    rules: TransitionRules<S>,
}

impl<S> StatusMachine<S>
where
    S: Copy + Eq + std::fmt::Display + std::fmt::Debug + 'static,
{
    /// Build a machine from its initial state and transition rules.
    #[must_use]
    pub const fn new(initial: S, rules: TransitionRules<S>) -> Self {
        Self { initial, rules }
    }

    /// The state assigned to freshly created resources.
    #[must_use]
    pub const fn initial(&self) -> S {
        self.initial
    }

    /// Validate a requested transition against the current persisted state.
    ///
    /// A transition to the current state is always an idempotent success.
    pub fn validate_transition(&self, current: S, requested: S) -> Result<(), IllegalTransition<S>> {
        if current == requested {
            return Ok(());
        }
        match self.rules {
            TransitionRules::AnyMember => Ok(()),
            TransitionRules::Table(table) => {
                let targets = table
                    .iter()
                    .find(|(from, _)| *from == current)
                    .map(|(_, targets)| *targets)
                    .unwrap_or(&[]);
                if targets.contains(&requested) {
                    Ok(())
                } else {
                    Err(IllegalTransition {
                        from: current,
                        to: requested,
                    })
                }
            }
        }
    }
}

/// Booking machine: membership-only validation, no transition table.
///
/// The asymmetry with restaurant orders is inherited behaviour kept on
/// purpose; it is expressed as configuration so the divergence is data, not
/// a separate code path.
pub const BOOKING_MACHINE: StatusMachine<BookingStatus> =
    StatusMachine::new(BookingStatus::Pending, TransitionRules::AnyMember);

/// Retail order machine: membership-only validation.
pub const ORDER_MACHINE: StatusMachine<FulfilmentStatus> =
    StatusMachine::new(FulfilmentStatus::Pending, TransitionRules::AnyMember);

/// Restaurant order machine: strict kitchen workflow with terminal
/// `DELIVERED` and `CANCELLED` states.
pub const RESTAURANT_ORDER_MACHINE: StatusMachine<FulfilmentStatus> = StatusMachine::new(
    FulfilmentStatus::Pending,
    TransitionRules::Table(&[
        (
            FulfilmentStatus::Pending,
            &[FulfilmentStatus::InProgress, FulfilmentStatus::Cancelled],
        ),
        (
            FulfilmentStatus::InProgress,
            &[FulfilmentStatus::Ready, FulfilmentStatus::Cancelled],
        ),
        (
            FulfilmentStatus::Ready,
            &[FulfilmentStatus::Delivered, FulfilmentStatus::Cancelled],
        ),
    ]),
);
