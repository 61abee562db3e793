/// Log output settings resolved at startup.
///
/// Production emits JSON lines for log shippers; everywhere else gets plain
/// text for the terminal. `LOG_FORMAT=json` (or any other value, for text)
/// overrides the environment default either way.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn for_environment(environment: &str) -> Self {
        Self {
            environment: environment.to_string(),
            json_format: json_format_for(environment, std::env::var("LOG_FORMAT").ok().as_deref()),
        }
    }
}

pub fn json_format_for(environment: &str, format_override: Option<&str>) -> bool {
    match format_override {
        Some(value) => value.eq_ignore_ascii_case("json"),
        None => environment.eq_ignore_ascii_case("production"),
    }
}
