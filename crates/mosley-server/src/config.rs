use serde::Deserialize;

use mosley_core::course::{Course, CourseLibrary, CourseSpec};

/// Top-level server configuration, loaded from `mosley.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Where standings, pairs and courses are kept. None = memory only.
    pub data_dir: Option<String>,
    pub enable_cors: bool,
    pub auth: AuthFileConfig,
    pub limits: LimitsConfig,
    /// Courses available from startup, in addition to any stored ones.
    pub courses: Vec<CourseSpec>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            data_dir: None,
            enable_cors: true,
            auth: AuthFileConfig::default(),
            limits: LimitsConfig::default(),
            courses: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub request_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
        }
    }
}

/// Auth section of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthFileConfig {
    pub bearer_token: Option<String>,
}

impl ServerConfig {
    /// Everything wrong with this configuration, one message per problem.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            problems.push(format!(
                "listen_addr {:?} is not a valid socket address",
                self.listen_addr
            ));
        }
        if self.limits.request_timeout_secs == 0 {
            problems.push("limits.request_timeout_secs must be > 0".to_string());
        }
        if let Some(dir) = &self.data_dir
            && dir.trim().is_empty()
        {
            problems.push("data_dir must not be empty".to_string());
        }
        for spec in &self.courses {
            if let Err(e) = Course::try_from(spec.clone()) {
                problems.push(format!("course {:?}: {e}", spec.name));
            }
        }
        problems
    }

    /// Validate configuration, exiting on errors.
    pub fn validate(&self) {
        if self.auth.bearer_token.is_some() {
            tracing::warn!(
                "bearer_token is set in config file, use MOSLEY_API_TOKEN env var in production"
            );
        }

        let problems = self.problems();
        for problem in &problems {
            tracing::error!("{problem}");
        }
        if !problems.is_empty() {
            std::process::exit(1);
        }
    }

    /// The configured courses. Invalid entries are skipped with an error
    /// logged; [`validate`](Self::validate) rejects them up front.
    pub fn course_library(&self) -> CourseLibrary {
        self.courses
            .iter()
            .filter_map(|spec| match Course::try_from(spec.clone()) {
                Ok(course) => Some(course),
                Err(e) => {
                    tracing::error!(course = %spec.name, error = %e, "Skipping invalid course");
                    None
                },
            })
            .collect()
    }

    /// Load config from `mosley.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("mosley.toml") {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from mosley.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse mosley.toml: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No mosley.toml found, using defaults");
                ServerConfig::default()
            },
        };

        if let Ok(addr) = std::env::var("MOSLEY_LISTEN_ADDR")
            && !addr.is_empty()
        {
            config.listen_addr = addr;
        }
        if let Ok(dir) = std::env::var("MOSLEY_DATA_DIR")
            && !dir.is_empty()
        {
            config.data_dir = Some(dir);
        }
        if let Ok(token) = std::env::var("MOSLEY_API_TOKEN")
            && !token.is_empty()
        {
            config.auth.bearer_token = Some(token);
        }
        if let Ok(val) = std::env::var("MOSLEY_REQUEST_TIMEOUT_SECS")
            && let Ok(n) = val.parse::<u64>()
        {
            config.limits.request_timeout_secs = n;
        }

        config
    }
}
