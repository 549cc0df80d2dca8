use rand::seq::SliceRandom;

/// Desktop Chrome user agents the session can present.
const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
];

/// Window sizes wide enough for the search feed's multi-column layout.
const WINDOW_SIZES: [(u32, u32); 4] = [(1920, 1080), (1536, 864), (1440, 900), (1366, 768)];

/// Browser identity presented to the target site.
#[derive(Debug, Clone)]
pub struct FingerprintConfig {
    pub user_agent: String,
    pub window_width: u32,
    pub window_height: u32,
    pub timezone: String,
}

impl FingerprintConfig {
    /// Pick a user agent and window size at random.
    pub fn randomized() -> Self {
        let mut rng = rand::thread_rng();

        let user_agent = USER_AGENTS.choose(&mut rng).unwrap_or(&USER_AGENTS[0]);
        let (width, height) = *WINDOW_SIZES.choose(&mut rng).unwrap_or(&WINDOW_SIZES[0]);

        Self {
            user_agent: (*user_agent).to_string(),
            window_width: width,
            window_height: height,
            timezone: "Asia/Shanghai".to_string(),
        }
    }

    /// Replace the randomized user agent with a fixed one.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Chromium command line flags carrying this identity.
    pub fn launch_args(&self) -> Vec<String> {
        vec![
            format!("--user-agent={}", self.user_agent),
            "--lang=zh-CN".to_string(),
        ]
    }
}
