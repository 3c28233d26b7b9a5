//! Names of the generation models accepted by the API.

pub const COMMAND: &str = "command";
pub const COMMAND_LIGHT: &str = "command-light";
pub const COMMAND_LIGHT_NIGHTLY: &str = "command-light-nightly";
pub const COMMAND_NIGHTLY: &str = "command-nightly";
pub const COMMAND_R: &str = "command-r";
pub const COMMAND_R_PLUS: &str = "command-r-plus";
