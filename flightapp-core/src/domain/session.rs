// flightapp-core/src/domain/session.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction isolation levels, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Snapshot,
    Serializable,
}

impl IsolationLevel {
    /// Keyword accepted by `SET TRANSACTION ISOLATION LEVEL`.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::ReadUncommitted => "READ UNCOMMITTED",
            Self::ReadCommitted => "READ COMMITTED",
            Self::RepeatableRead => "REPEATABLE READ",
            Self::Snapshot => "SNAPSHOT",
            Self::Serializable => "SERIALIZABLE",
        }
    }
}

impl fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

/// Session behaviour applied right after the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub auto_commit: bool,
    pub isolation: IsolationLevel,
}

impl SessionSettings {
    /// Every statement commits on its own, under the strictest isolation.
    pub const DEFAULT: SessionSettings = SessionSettings {
        auto_commit: true,
        isolation: IsolationLevel::Serializable,
    };

    /// T-SQL batch putting a SQL Server session into this state.
    pub fn to_tsql(&self) -> String {
        let implicit = if self.auto_commit { "OFF" } else { "ON" };
        format!(
            "SET IMPLICIT_TRANSACTIONS {}; SET TRANSACTION ISOLATION LEVEL {};",
            implicit,
            self.isolation.as_sql()
        )
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_autocommit_serializable() {
        let settings = SessionSettings::default();
        assert!(settings.auto_commit);
        assert_eq!(settings.isolation, IsolationLevel::Serializable);
    }

    #[test]
    fn test_isolation_ordering() {
        assert!(IsolationLevel::ReadCommitted < IsolationLevel::Serializable);
        assert_eq!(IsolationLevel::RepeatableRead.to_string(), "REPEATABLE READ");
    }

    #[test]
    fn test_tsql_batch() {
        assert_eq!(
            SessionSettings::DEFAULT.to_tsql(),
            "SET IMPLICIT_TRANSACTIONS OFF; SET TRANSACTION ISOLATION LEVEL SERIALIZABLE;"
        );
    }
}
