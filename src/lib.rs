pub mod routing;
pub mod settings;
pub mod storage;
pub mod telemetry;
pub mod types;
pub mod users;
pub mod utils;
pub mod widgets;

pub static ENV: once_cell::sync::Lazy<minijinja::Environment<'static>> =
    once_cell::sync::Lazy::new(|| {
        let mut env = minijinja::Environment::new();
        env.set_source(minijinja::Source::from_path("templates"));
        env
    });
