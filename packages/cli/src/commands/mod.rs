pub mod codec;
pub mod config;
pub mod replay;

pub use codec::{check, format, parse, CheckArgs, FormatArgs, ParseArgs};
pub use config::{config, ConfigArgs};
pub use replay::{replay, ReplayArgs};
