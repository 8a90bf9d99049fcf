use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub model_api_url: String,
    pub model_api_key: String,
    pub model_name: String,
    pub model_timeout_secs: u64,

    // Background health-check ping against the completion service
    pub model_keepalive_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8020".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            model_api_url: env::var("MODEL_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".into()),
            model_api_key: env::var("MODEL_API_KEY").unwrap_or_else(|_| String::new()),
            model_name: env::var("MODEL_NAME").unwrap_or_else(|_| "gpt-3.5-turbo".into()),
            model_timeout_secs: env::var("MODEL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),

            model_keepalive_secs: env::var("MODEL_KEEPALIVE_SECS")
                .unwrap_or_else(|_| "1800".into()) // 30 minutes
                .parse()
                .unwrap_or(1800),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
