use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::kit::{
    dispatcher::KitDispatcher, grant::HttpKitService, messages::MessageCatalog,
    permissions::RoleGate,
};

pub type Dispatcher = KitDispatcher<RoleGate, HttpKitService>;

pub struct Data {
    /// Commands arrive concurrently, so the cooldown check-then-update is
    /// serialized behind this mutex.
    pub dispatcher: Mutex<Dispatcher>,
    pub messages: MessageCatalog,
    pub config_path: PathBuf,
    pub invoc_time: RwLock<HashMap<u64, Instant>>,
}
