mod app_config;

pub use app_config::{
    AppConfig, BackendConfig, ChatConfig, LogFormat, LoggingConfig, UploadConfig,
};
