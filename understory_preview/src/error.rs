// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// Misuse of the preview API that callers must fix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreviewError {
    /// The hook-style accessor ran outside a mounted [`PreviewProvider`](crate::PreviewProvider).
    #[error("use_quick_preview must be used within a mounted PreviewProvider")]
    ProviderNotMounted,
}

/// Failure of a best-effort feedback channel (haptics, announcements).
///
/// These never reach the host application: callers log and drop them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    /// The platform engine is not installed or not available.
    #[error("feedback engine unavailable")]
    Unavailable,
    /// The engine is present but refused the request.
    #[error("feedback request failed: {0}")]
    Failed(String),
}
