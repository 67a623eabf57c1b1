use crate::infrastructure::botdata;

pub mod kit {
    pub mod config;
    pub mod dispatcher;
    pub mod grant;
    pub mod messages;
    pub mod permissions;
}

pub mod commands {
    pub mod builtins;
    pub mod randomkit;
}

pub mod infrastructure {
    pub mod botdata;
    pub mod colors;
    pub mod environment;
    pub mod event_handler;
    pub mod util;
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, botdata::Data, Error>;
