//! Service configuration, read once at startup from environment
//! variables with hard defaults.

use std::net::SocketAddr;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Work-week policy used when a request omits `work_week`.
    pub default_work_week: u8,
    /// Leave balance used when a request omits `leave_balance`.
    pub default_leave_balance: i32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("LEAVE_PLANNER_ADDR", SocketAddr::from(([127, 0, 0, 1], 8000))),
            default_work_week: env_or("LEAVE_PLANNER_WORK_WEEK", 5),
            default_leave_balance: env_or("LEAVE_PLANNER_LEAVE_BALANCE", 18),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            default_work_week: 5,
            default_leave_balance: 18,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Invalid value for {}: {:?}, using default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}
