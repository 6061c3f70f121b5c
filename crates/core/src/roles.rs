//! Role names and capability predicates.

pub const ROLE_USER: &str = "user";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_ADMIN: &str = "admin";

/// Whether a role may review submitted host profiles.
pub fn is_reviewer(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MODERATOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admins_and_moderators_are_reviewers() {
        assert!(is_reviewer(ROLE_ADMIN));
        assert!(is_reviewer(ROLE_MODERATOR));
    }

    #[test]
    fn plain_users_are_not_reviewers() {
        assert!(!is_reviewer(ROLE_USER));
        assert!(!is_reviewer(""));
        assert!(!is_reviewer("superuser"));
    }
}
