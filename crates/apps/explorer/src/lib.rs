pub mod config;
pub mod script;
pub mod session;

pub use config::{ConfigError, ExplorerConfig, FilterMode};
pub use script::{Input, Script, ScriptError, ScriptStep};
pub use session::{Session, SessionSnapshot};
