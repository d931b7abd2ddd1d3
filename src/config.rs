use std::env;

/// Settings for issuing and validating session tokens.
///
/// All values come from the environment; the signing secret in particular is
/// the single root of trust for every issued token and is never exposed
/// through any endpoint or log line.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_minutes: i64,
}

impl JwtSettings {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            issuer: env::var("JWT_ISSUER").expect("JWT_ISSUER must be set"),
            audience: env::var("JWT_AUDIENCE").expect("JWT_AUDIENCE must be set"),
            expiry_minutes: env::var("JWT_EXPIRY_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("JWT_EXPIRY_MINUTES must be a number"),
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub jwt: JwtSettings,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt: JwtSettings::from_env(),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required environment variables
        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("JWT_SECRET", "test-secret");
        env::set_var("JWT_ISSUER", "tasktrack-test");
        env::set_var("JWT_AUDIENCE", "tasktrack-clients");

        let config = Config::from_env();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.jwt.secret, "test-secret");
        assert_eq!(config.jwt.issuer, "tasktrack-test");
        assert_eq!(config.jwt.audience, "tasktrack-clients");
        assert_eq!(config.jwt.expiry_minutes, 60);

        // Test custom values
        env::set_var("SERVER_PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("JWT_EXPIRY_MINUTES", "15");

        let config = Config::from_env();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.jwt.expiry_minutes, 15);
        assert_eq!(config.server_url(), "http://0.0.0.0:3000");
    }
}
