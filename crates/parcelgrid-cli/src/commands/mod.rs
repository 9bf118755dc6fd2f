// One module per subcommand; main.rs parses arguments and dispatches here.

pub mod compare;
pub mod path;
pub mod solve;
pub mod validate;
