//! The order status state machine.
//!
//! ```text
//! pending ──accept──▶ preparing ──mark_ready──▶ ready ──mark_completed──▶ completed
//!    │                    │
//!    └─reject/cancel──▶ cancelled ◀──cancel──┘
//! ```

use crate::domain::{Order, OrderStatus};
use super::OrderError;

impl Order {
    pub fn accept(&mut self, estimated_minutes: u32) -> Result<(), OrderError> {
        self.ensure_status(&[OrderStatus::Pending], OrderStatus::Preparing)?;
        if estimated_minutes == 0 {
            return Err(OrderError::ValidationError(
                "Estimated time must be at least 1 minute".to_string(),
            ));
        }

        self.status = OrderStatus::Preparing;
        self.estimated_minutes = Some(estimated_minutes);
        self.time_remaining_secs = estimated_minutes.saturating_mul(60);
        Ok(())
    }

    pub fn reject(&mut self, reason: &str) -> Result<(), OrderError> {
        self.ensure_status(&[OrderStatus::Pending], OrderStatus::Cancelled)?;
        if reason.trim().is_empty() {
            return Err(OrderError::ValidationError(
                "Rejection reason is required".to_string(),
            ));
        }

        self.status = OrderStatus::Cancelled;
        self.rejection_reason = Some(reason.to_string());
        self.time_remaining_secs = 0;
        Ok(())
    }

    /// Advisory only: elapsed time is not taken into account.
    pub fn request_more_time(&mut self, additional_minutes: u32) -> Result<(), OrderError> {
        self.ensure_status(&[OrderStatus::Preparing], OrderStatus::Preparing)?;
        if additional_minutes == 0 {
            return Err(OrderError::ValidationError(
                "Additional time must be at least 1 minute".to_string(),
            ));
        }

        let estimate = self.estimated_minutes.unwrap_or_default();
        self.estimated_minutes = Some(estimate.saturating_add(additional_minutes));
        self.time_remaining_secs = self
            .time_remaining_secs
            .saturating_add(additional_minutes.saturating_mul(60));
        Ok(())
    }

    pub fn mark_ready(&mut self) -> Result<(), OrderError> {
        self.ensure_status(&[OrderStatus::Preparing], OrderStatus::Ready)?;
        self.status = OrderStatus::Ready;
        self.time_remaining_secs = 0;
        Ok(())
    }

    pub fn mark_completed(&mut self) -> Result<(), OrderError> {
        self.ensure_status(&[OrderStatus::Ready], OrderStatus::Completed)?;
        self.status = OrderStatus::Completed;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.ensure_status(
            &[OrderStatus::Pending, OrderStatus::Preparing],
            OrderStatus::Cancelled,
        )?;
        self.status = OrderStatus::Cancelled;
        self.time_remaining_secs = 0;
        Ok(())
    }

    pub fn tick(&mut self, elapsed_secs: u32) -> Result<(), OrderError> {
        self.ensure_status(&[OrderStatus::Preparing], OrderStatus::Preparing)?;
        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(elapsed_secs);
        Ok(())
    }

    fn ensure_status(&self, allowed: &[OrderStatus], attempted: OrderStatus) -> Result<(), OrderError> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(OrderError::InvalidTransition {
                current: self.status,
                attempted,
            })
        }
    }
}
