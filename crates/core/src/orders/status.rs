//! Order Status
//!
//! Lifecycle of an order and the transitions an admin may apply to it.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order lifecycle state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Initial state of every new order.
    #[default]
    Placed,

    /// Waiting for an admin to check the uploaded prescription.
    PendingVerification,

    /// Cleared for dispatch.
    Verified,

    /// Handed to the courier.
    Dispatched,

    /// Terminal.
    Delivered,
}

/// Rejected status change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// `to` is not a successor of `from`.
    #[error("cannot move order from {from} to {to}")]
    NotAllowed {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// Prescription orders must pass through verification.
    #[error("prescription order must be verified before moving from {from} to {to}")]
    VerificationRequired {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// Only orders with prescription items enter verification.
    #[error("order has no prescription items to verify")]
    NothingToVerify,
}

impl TransitionError {
    /// Status the order was in.
    pub fn from(&self) -> OrderStatus {
        match self {
            Self::NotAllowed { from, .. } | Self::VerificationRequired { from, .. } => *from,
            Self::NothingToVerify => OrderStatus::Placed,
        }
    }

    /// Status that was requested.
    pub fn to(&self) -> OrderStatus {
        match self {
            Self::NotAllowed { to, .. } | Self::VerificationRequired { to, .. } => *to,
            Self::NothingToVerify => OrderStatus::PendingVerification,
        }
    }
}

/// Unknown status string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(String);

impl OrderStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Placed,
        Self::PendingVerification,
        Self::Verified,
        Self::Dispatched,
        Self::Delivered,
    ];

    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::PendingVerification => "pending_verification",
            Self::Verified => "verified",
            Self::Dispatched => "dispatched",
            Self::Delivered => "delivered",
        }
    }

    /// Label shown to shoppers and admins.
    pub fn label(self) -> &'static str {
        match self {
            Self::Placed => "Order Placed",
            Self::PendingVerification => "Pending Verification",
            Self::Verified => "Verified",
            Self::Dispatched => "Dispatched",
            Self::Delivered => "Delivered",
        }
    }

    /// Whether the order still waits on an admin review.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Placed | Self::PendingVerification)
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }

    /// Statuses reachable in one step, ignoring the prescription routing rule.
    pub fn successors(self) -> &'static [Self] {
        match self {
            Self::Placed => &[Self::PendingVerification, Self::Verified],
            Self::PendingVerification => &[Self::Verified],
            Self::Verified => &[Self::Dispatched],
            Self::Dispatched => &[Self::Delivered],
            Self::Delivered => &[],
        }
    }

    /// Check a single-step move to `to`.
    ///
    /// Orders with prescription items go `placed → pending_verification → verified`;
    /// orders without skip straight from `placed` to `verified`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] describing why the move is illegal.
    pub fn check_transition(
        self,
        to: Self,
        requires_prescription: bool,
    ) -> Result<(), TransitionError> {
        if !self.successors().contains(&to) {
            return Err(TransitionError::NotAllowed { from: self, to });
        }

        match (self, to) {
            (Self::Placed, Self::Verified) if requires_prescription => {
                Err(TransitionError::VerificationRequired { from: self, to })
            }
            (Self::Placed, Self::PendingVerification) if !requires_prescription => {
                Err(TransitionError::NothingToVerify)
            }
            _ => Ok(()),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");

        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn prescription_order_walks_full_lifecycle() -> TestResult {
        let path = [
            OrderStatus::Placed,
            OrderStatus::PendingVerification,
            OrderStatus::Verified,
            OrderStatus::Dispatched,
            OrderStatus::Delivered,
        ];

        for pair in path.windows(2) {
            if let [from, to] = pair {
                from.check_transition(*to, true)?;
            }
        }

        Ok(())
    }

    #[test]
    fn plain_order_skips_verification() -> TestResult {
        OrderStatus::Placed.check_transition(OrderStatus::Verified, false)?;

        assert_eq!(
            OrderStatus::Placed.check_transition(OrderStatus::PendingVerification, false),
            Err(TransitionError::NothingToVerify)
        );

        Ok(())
    }

    #[test]
    fn prescription_order_cannot_skip_verification() {
        assert_eq!(
            OrderStatus::Placed.check_transition(OrderStatus::Verified, true),
            Err(TransitionError::VerificationRequired {
                from: OrderStatus::Placed,
                to: OrderStatus::Verified,
            })
        );
    }

    #[test]
    fn jumps_and_reversals_are_rejected() {
        for (from, to) in [
            (OrderStatus::Placed, OrderStatus::Delivered),
            (OrderStatus::Placed, OrderStatus::Dispatched),
            (OrderStatus::Verified, OrderStatus::Placed),
            (OrderStatus::Dispatched, OrderStatus::Dispatched),
            (OrderStatus::Delivered, OrderStatus::Placed),
        ] {
            assert_eq!(
                from.check_transition(to, false),
                Err(TransitionError::NotAllowed { from, to }),
                "{from} -> {to} should be rejected"
            );
        }
    }

    #[test]
    fn delivered_is_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(!OrderStatus::Dispatched.is_terminal());
    }

    #[test]
    fn pending_covers_placed_and_pending_verification() {
        let pending: Vec<OrderStatus> = OrderStatus::ALL
            .into_iter()
            .filter(|status| status.is_pending())
            .collect();

        assert_eq!(
            pending,
            vec![OrderStatus::Placed, OrderStatus::PendingVerification]
        );
    }

    #[test]
    fn parses_wire_names() -> TestResult {
        assert_eq!(
            "pending_verification".parse::<OrderStatus>()?,
            OrderStatus::PendingVerification
        );
        assert_eq!(
            "Pending-Verification".parse::<OrderStatus>()?,
            OrderStatus::PendingVerification
        );
        assert!("shipped".parse::<OrderStatus>().is_err());

        Ok(())
    }
}
