use clap::Parser;

#[derive(Parser)]
#[command(name = "matchday")]
pub(crate) struct Cli {
    #[arg(long, default_value = "127.0.0.1")]
    pub(crate) host: String,
    #[arg(long, default_value_t = 8080)]
    pub(crate) port: u16,
    /// Base URL of the generative-language API.
    #[arg(long, default_value = matchday_core::DEFAULT_BASE_URL)]
    pub(crate) base_url: String,
    #[arg(long, default_value_t = 5)]
    pub(crate) connect_timeout_secs: u64,
    #[arg(long, default_value_t = 30)]
    pub(crate) request_timeout_secs: u64,
    /// Overrides the GEMINI_API_KEY / GOOGLE_API_KEY environment variables.
    #[arg(long, env = "MATCHDAY_API_KEY", hide_env_values = true)]
    pub(crate) api_key: Option<String>,
}
