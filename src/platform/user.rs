// PathBridge - platform/user.rs
//
// Login name of the current user, used as the fallback target username.

/// Environment variables consulted in order: Windows first, then POSIX.
const USERNAME_VARS: &[&str] = &["USERNAME", "USER", "LOGNAME"];

/// Best-effort login name from the environment. `None` when unset or blank.
pub fn current_username() -> Option<String> {
    username_from(|key| std::env::var(key).ok())
}

fn username_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    USERNAME_VARS.iter().find_map(|key| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_non_blank_variable_wins() {
        let found = username_from(|key| match key {
            "USERNAME" => Some("  ".to_string()),
            "USER" => Some("jane".to_string()),
            _ => Some("other".to_string()),
        });
        assert_eq!(found.as_deref(), Some("jane"));
    }

    #[test]
    fn test_nothing_set() {
        assert_eq!(username_from(|_| None), None);
    }
}
