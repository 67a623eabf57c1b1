use std::path::PathBuf;

use anyhow::Context;

macro_rules! const_str {
    ($name:ident) => {
        pub const $name: &str = stringify!($name);
    };
}

const_str!(DATA_DIRECTORY);
const_str!(DISCORD_TOKEN);
const_str!(OWNERS);
const_str!(COMMAND_DISABLE_LIST);

const_str!(KITBOT_LOG);

pub fn env_var_with_context(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("missing environment variable {}", name))
}

pub fn get_data_directory() -> PathBuf {
    std::env::var(DATA_DIRECTORY)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}
