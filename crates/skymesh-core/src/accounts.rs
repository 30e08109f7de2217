//! Decoder for the account table printed by `switch --list`.

const CURRENT_MARKER: char = '*';
const IDENTIFIER_COLUMN: usize = 2;

/// Accounts known to the mesh client, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSet {
    accounts: Vec<String>,
    current: Option<String>,
}

impl AccountSet {
    /// Never fails: rows too short to carry an identifier are skipped, so
    /// unexpected output decodes to an empty set.
    pub fn parse(table: &str) -> Self {
        let mut set = AccountSet::default();

        for line in table.lines().skip(1) {
            let trimmed = line.trim_end();
            let Some(token) = trimmed.split_whitespace().nth(IDENTIFIER_COLUMN) else {
                continue;
            };
            let account = token.trim_end_matches(CURRENT_MARKER);
            if account.is_empty() {
                continue;
            }

            if trimmed.ends_with(CURRENT_MARKER) && set.current.is_none() {
                set.current = Some(account.to_string());
            }
            if !set.contains(account) {
                set.accounts.push(account.to_string());
            }
        }

        log::debug!(
            "decoded {} accounts, current: {:?}",
            set.accounts.len(),
            set.current
        );
        set
    }

    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, account: &str) -> bool {
        self.accounts.iter().any(|a| a == account)
    }

    pub fn is_current(&self, account: &str) -> bool {
        self.current.as_deref() == Some(account)
    }
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
