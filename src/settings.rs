#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub debug: bool,
    /// SMTP details for the admin signup notification. When absent the
    /// notification degrades to a logged no-op.
    #[serde(default)]
    pub email: Option<EmailSettings>,
    pub pages: PagesSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailSettings {
    pub host: String,
    pub port: u16,
    pub host_user: String,
    pub host_user_password: secrecy::SecretString,
    pub authentication: bool,
    pub admin_email: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct PagesSettings {
    pub catalog_url: String,
    pub admin_url: String,
}

/// Runtime environment the application can run in.
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Multipurpose function that helps detect the current environment the
/// application is running in and loads the matching settings files.
pub fn get_settings() -> Result<Settings, config::ConfigError> {
    dotenv::dotenv().ok();

    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let settings_directory = base_path.join("settings");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(settings_directory.join("base.yaml")))
        .add_source(
            config::File::from(settings_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
