/// Connection settings for the foreman database.
///
/// Resolution of where the URL comes from (CLI flags, environment, config
/// file) lives in the `foreman` binary; this type only carries the result.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full PostgreSQL connection URL.
    pub database_url: String,
}

impl DbConfig {
    /// URL used when nothing else is configured.
    pub const DEFAULT_URL: &str = "postgresql://localhost:5432/foreman";

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Name of the target database: the last path segment of the URL.
    pub fn database_name(&self) -> Option<&str> {
        let (_, name) = self.database_url.rsplit_once('/')?;
        (!name.is_empty()).then_some(name)
    }

    /// URL for the `postgres` maintenance database on the same server.
    ///
    /// `CREATE DATABASE` has to run from a database that already exists, so
    /// bootstrap connects here instead of to the target URL.
    pub fn maintenance_url(&self) -> String {
        match self.database_url.rsplit_once('/') {
            Some((server, _)) => format!("{server}/postgres"),
            None => self.database_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_name_is_last_path_segment() {
        let cfg = DbConfig::new("postgresql://remotehost:5433/other");
        assert_eq!(cfg.database_name(), Some("other"));
    }

    #[test]
    fn database_name_absent_for_trailing_slash() {
        let cfg = DbConfig::new("postgresql://localhost:5432/");
        assert_eq!(cfg.database_name(), None);
    }

    #[test]
    fn maintenance_url_swaps_database() {
        let cfg = DbConfig::new(DbConfig::DEFAULT_URL);
        assert_eq!(
            cfg.maintenance_url(),
            "postgresql://localhost:5432/postgres"
        );
    }

    #[test]
    fn maintenance_url_passes_through_without_path() {
        let cfg = DbConfig::new("localhost:5432");
        assert_eq!(cfg.maintenance_url(), "localhost:5432");
    }
}
