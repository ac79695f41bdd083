use nippo_core::roles::Role;

/// Bootstrap configuration loaded from environment variables.
///
/// | Env Var              | Default         |
/// |----------------------|-----------------|
/// | `DATABASE_URL`       | (required)      |
/// | `DB_MAX_CONNECTIONS` | `20`            |
/// | `ADMIN_CODE`         | `admin`         |
/// | `ADMIN_NAME`         | `Administrator` |
/// | `ADMIN_PASSWORD`     | (required)      |
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub admin: AdminSeed,
}

/// The administrator account created on first start.
#[derive(Clone)]
pub struct AdminSeed {
    pub code: String,
    pub name: String,
    pub role: Role,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl BootstrapConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                expected: "u32",
                value: raw,
            })?,
            None => nippo_db::DEFAULT_MAX_CONNECTIONS,
        };

        let admin = AdminSeed {
            code: lookup("ADMIN_CODE").unwrap_or_else(|| "admin".into()),
            name: lookup("ADMIN_NAME").unwrap_or_else(|| "Administrator".into()),
            role: Role::Admin,
            password: lookup("ADMIN_PASSWORD").ok_or(ConfigError::Missing("ADMIN_PASSWORD"))?,
        };

        Ok(Self {
            database_url,
            max_connections,
            admin,
        })
    }
}
