//! Security event log lines. Never carries secrets; emails are redacted.

use tracing::{info, warn};

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A protected request was turned away by the session gate.
pub fn session_rejected(reason: &'static str, account_id: Option<i64>) {
    let trace_id = trace_ctx::trace_id();
    warn!(
        event = "SECURITY_SESSION_REJECTED",
        %trace_id,
        account_id,
        reason,
        "Session rejected"
    );
}

/// A credential check failed (login or restore).
pub fn login_failed(reason: &'static str, email: &str) {
    let trace_id = trace_ctx::trace_id();
    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}

/// An account changed lifecycle state.
pub fn account_status_changed(account_id: i64, status: &'static str) {
    let trace_id = trace_ctx::trace_id();
    info!(
        event = "ACCOUNT_STATUS_CHANGED",
        %trace_id,
        account_id,
        status,
        "Account status changed"
    );
}
