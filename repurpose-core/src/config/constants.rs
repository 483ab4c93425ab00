/// Model ID constants for the Gemini backend
pub mod models {
    pub mod google {
        pub const GEMINI_2_5_FLASH: &str = "gemini-2.5-flash";
        pub const GEMINI_2_5_PRO: &str = "gemini-2.5-pro";
        pub const GEMINI_1_5_PRO: &str = "gemini-1.5-pro";
        pub const GEMINI_1_5_FLASH: &str = "gemini-1.5-flash";
        pub const GEMINI_1_5_PRO_LATEST: &str = "gemini-1.5-pro-latest";
        pub const GEMINI_1_5_FLASH_LATEST: &str = "gemini-1.5-flash-latest";

        /// Static preference order tried before any discovered model
        pub const PREFERRED_MODELS: &[&str] = &[
            GEMINI_2_5_FLASH,
            GEMINI_2_5_PRO,
            GEMINI_1_5_PRO,
            GEMINI_1_5_FLASH,
            GEMINI_1_5_PRO_LATEST,
            GEMINI_1_5_FLASH_LATEST,
        ];

        /// Generation method a discovered model must advertise
        pub const GENERATE_CONTENT_METHOD: &str = "generateContent";
    }
}

/// API endpoints
pub mod urls {
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
}

/// Environment variable names
pub mod env_vars {
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
}

/// Default values shared by config structs and CLI flags
pub mod defaults {
    pub const MIN_WORDS_PER_SEGMENT: usize = 100;
    pub const DEFAULT_MAX_WORDS: usize = 20_000;
    pub const PREVIEW_LENGTH: usize = 400;
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const MAX_CONCURRENCY: usize = 1;
    pub const HISTORY_LIMIT: usize = 50;
    pub const SERVER_HOST: &str = "127.0.0.1";
    pub const SERVER_PORT: u16 = 8000;
    pub const USER_AGENT: &str = concat!("repurpose/", env!("CARGO_PKG_VERSION"));
}

/// Workspace file and directory names
pub mod project {
    pub const CONFIG_FILE_NAME: &str = "repurpose.toml";
    pub const CONFIG_DIR_NAME: &str = ".repurpose";
    pub const POSTS_DIR: &str = ".repurpose/posts";
}

/// Message fragments used in per-request failure placeholders
pub mod messages {
    pub const GENERATION_ERROR_PREFIX: &str = "Error generating content";
    pub const MODEL_TIP_PREFIX: &str = "Tip: Set GEMINI_MODEL to one of";
    pub const ASK_PROMPT_PREFIX: &str = "Answer the following question clearly and concisely:";
}
