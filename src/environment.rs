use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the monitor API deployments the CLI can talk to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development backend.
    #[default]
    Local,
    /// Any other deployment, addressed by its API base URL.
    Custom { api_base_url: String },
}

impl Environment {
    /// Returns the monitor API base URL associated with the environment.
    pub fn api_base_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8080/api".to_string(),
            Environment::Custom { api_base_url } => api_base_url.clone(),
        }
    }

    /// Build an environment from an explicit URL override, if one was given.
    pub fn from_url_override(url: Option<String>, fallback: Environment) -> Environment {
        match url {
            Some(api_base_url) => Environment::Custom {
                api_base_url: api_base_url.trim_end_matches('/').to_string(),
            },
            None => fallback,
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            url if url.contains("://") => Ok(Environment::Custom {
                api_base_url: s.trim_end_matches('/').to_string(),
            }),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_and_urls() {
        assert_eq!("local".parse::<Environment>().unwrap(), Environment::Local);
        assert_eq!(
            "https://monitor.example.com/api/"
                .parse::<Environment>()
                .unwrap(),
            Environment::Custom {
                api_base_url: "https://monitor.example.com/api".to_string()
            }
        );
        assert!("garbage".parse::<Environment>().is_err());
    }
}
