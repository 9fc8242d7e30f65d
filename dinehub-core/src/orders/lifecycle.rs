//! Order status state machine
//!
//! Legal moves are the forward pipeline edges plus `cancelled` from any
//! non-terminal state. Nothing leaves `completed` or `cancelled`.
//!
//! [`TransitionPolicy::SingleStep`] (default) allows only the next
//! pipeline state; [`TransitionPolicy::SkipAhead`] allows any later one.

use super::OrderStore;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::order::{Order, OrderStatus};
use std::fmt;
use std::str::FromStr;

/// Which forward moves are legal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    SingleStep,
    SkipAhead,
}

impl TransitionPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SingleStep => "single-step",
            Self::SkipAhead => "skip-ahead",
        }
    }

    pub fn allows(&self, from: OrderStatus, to: OrderStatus) -> bool {
        if from.is_terminal() {
            return false;
        }
        if to == OrderStatus::Cancelled {
            return true;
        }
        match self {
            Self::SingleStep => from.next() == Some(to),
            Self::SkipAhead => matches!((from.rank(), to.rank()), (Some(f), Some(t)) if t > f),
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single-step" | "single_step" => Ok(Self::SingleStep),
            "skip-ahead" | "skip_ahead" => Ok(Self::SkipAhead),
            other => Err(format!("unknown transition policy: {other}")),
        }
    }
}

/// Applies status transitions under a policy
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderLifecycle {
    policy: TransitionPolicy,
}

impl OrderLifecycle {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn can_transition(&self, from: OrderStatus, to: OrderStatus) -> bool {
        self.policy.allows(from, to)
    }

    /// The order moved to `target`; `order` itself is left unchanged
    pub fn transition(&self, order: &Order, target: OrderStatus) -> AppResult<Order> {
        if !self.can_transition(order.status, target) {
            return Err(AppError::with_message(
                ErrorCode::IllegalTransition,
                format!(
                    "Order {} cannot move from {} to {}",
                    order.id, order.status, target
                ),
            )
            .with_detail("order_id", order.id.as_str())
            .with_detail("from", order.status.as_str())
            .with_detail("to", target.as_str())
            .with_detail("policy", self.policy.as_str()));
        }
        Ok(Order {
            status: target,
            ..order.clone()
        })
    }

    /// Load, transition and persist
    pub async fn advance(
        &self,
        orders: &OrderStore,
        order_id: &str,
        target: OrderStatus,
    ) -> AppResult<Order> {
        let current = orders.require(order_id).await?;
        let mut next = self.transition(&current, target)?;
        orders.persist(&mut next, current.status).await?;
        tracing::info!(
            order_id = %order_id,
            outlet_id = %next.outlet_id,
            from = %current.status,
            to = %target,
            "Order status changed"
        );
        Ok(next)
    }
}
