//! Mobile verification ledger rules.
//!
//! Pure checks over a pending code; the repository layer persists the
//! attempt decrements and invalidations the caller derives from the
//! returned error. Expiry is evaluated lazily here, never by a timer.

use rand::Rng;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Number of digits in a verification code.
pub const CODE_LENGTH: usize = 6;

/// Code validity window in minutes.
pub const CODE_TTL_MINS: i64 = 10;

/// Wrong-code attempts allowed per code.
pub const MAX_ATTEMPTS: i32 = 5;

/// Minimum seconds between two sends for the same owner.
pub const RESEND_COOLDOWN_SECS: i64 = 60;

/// A code awaiting confirmation, as loaded from storage.
#[derive(Debug, Clone)]
pub struct PendingCode {
    pub code: String,
    pub expires_at: Timestamp,
    pub attempts_remaining: i32,
    pub consumed: bool,
}

impl PendingCode {
    /// Whether the code can still be confirmed at `now`.
    pub fn is_active(&self, now: Timestamp) -> bool {
        !self.consumed && self.attempts_remaining > 0 && self.expires_at > now
    }
}

/// Generate a random numeric code of [`CODE_LENGTH`] digits.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Expiry instant for a code sent at `sent_at`.
pub fn expires_at(sent_at: Timestamp) -> Timestamp {
    sent_at + chrono::Duration::minutes(CODE_TTL_MINS)
}

/// Enforce the resend cooldown against the last send time, if any.
pub fn ensure_resend_allowed(
    last_sent_at: Option<Timestamp>,
    now: Timestamp,
) -> Result<(), CoreError> {
    if let Some(sent_at) = last_sent_at {
        let elapsed = (now - sent_at).num_seconds();
        if elapsed < RESEND_COOLDOWN_SECS {
            return Err(CoreError::TooManyRequests(format!(
                "A code was sent {elapsed}s ago. Wait {RESEND_COOLDOWN_SECS}s between requests."
            )));
        }
    }
    Ok(())
}

/// Check a submitted code against the pending one.
///
/// - `NoPendingCode` if the stored code is consumed, expired, or already
///   exhausted.
/// - `CodeMismatch { attempts_remaining }` on a wrong code with attempts
///   left; the caller persists the decrement.
/// - `AttemptsExhausted` when the wrong code spends the final attempt; the
///   caller invalidates the code.
/// - `Ok(())` on a match; the caller marks the code consumed.
pub fn confirm_code(
    pending: &PendingCode,
    submitted: &str,
    now: Timestamp,
) -> Result<(), CoreError> {
    if !pending.is_active(now) {
        return Err(CoreError::NoPendingCode);
    }
    if pending.code != submitted {
        let attempts_remaining = pending.attempts_remaining - 1;
        if attempts_remaining <= 0 {
            return Err(CoreError::AttemptsExhausted);
        }
        return Err(CoreError::CodeMismatch { attempts_remaining });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pending(code: &str, attempts: i32) -> PendingCode {
        PendingCode {
            code: code.to_string(),
            expires_at: Utc::now() + chrono::Duration::minutes(CODE_TTL_MINS),
            attempts_remaining: attempts,
            consumed: false,
        }
    }

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..20 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn matching_code_confirms() {
        let p = pending("123456", MAX_ATTEMPTS);
        assert!(confirm_code(&p, "123456", Utc::now()).is_ok());
    }

    #[test]
    fn wrong_code_decrements_attempts() {
        let p = pending("123456", MAX_ATTEMPTS);
        let err = confirm_code(&p, "000000", Utc::now()).unwrap_err();
        match err {
            CoreError::CodeMismatch { attempts_remaining } => {
                assert_eq!(attempts_remaining, MAX_ATTEMPTS - 1)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fifth_wrong_attempt_exhausts() {
        // Simulate the repository decrementing after each mismatch.
        let mut p = pending("123456", MAX_ATTEMPTS);
        for attempt in 1..MAX_ATTEMPTS {
            let err = confirm_code(&p, "000000", Utc::now()).unwrap_err();
            match err {
                CoreError::CodeMismatch { attempts_remaining } => {
                    assert_eq!(attempts_remaining, MAX_ATTEMPTS - attempt);
                    p.attempts_remaining = attempts_remaining;
                }
                other => panic!("attempt {attempt}: unexpected error {other}"),
            }
        }
        let err = confirm_code(&p, "000000", Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::AttemptsExhausted));
    }

    #[test]
    fn expired_code_is_not_pending() {
        let mut p = pending("123456", MAX_ATTEMPTS);
        p.expires_at = Utc::now() - chrono::Duration::seconds(1);
        let err = confirm_code(&p, "123456", Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::NoPendingCode));
    }

    #[test]
    fn consumed_code_is_not_pending() {
        let mut p = pending("123456", MAX_ATTEMPTS);
        p.consumed = true;
        let err = confirm_code(&p, "123456", Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::NoPendingCode));
    }

    #[test]
    fn exhausted_code_is_not_pending_even_on_match() {
        let p = pending("123456", 0);
        let err = confirm_code(&p, "123456", Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::NoPendingCode));
    }

    #[test]
    fn resend_cooldown_enforced() {
        let now = Utc::now();
        assert!(ensure_resend_allowed(None, now).is_ok());
        assert!(
            ensure_resend_allowed(Some(now - chrono::Duration::seconds(61)), now).is_ok()
        );

        let err = ensure_resend_allowed(Some(now - chrono::Duration::seconds(10)), now)
            .unwrap_err();
        match err {
            CoreError::TooManyRequests(msg) => {
                assert!(msg.contains("10s ago"));
                assert!(msg.contains("60s"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn expiry_window_is_ten_minutes() {
        let sent = Utc::now();
        assert_eq!(expires_at(sent) - sent, chrono::Duration::minutes(10));
    }
}
