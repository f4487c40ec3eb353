//! Commands: the routable unit, its arguments and run-time extension points.

pub mod arguments;
pub mod command;
pub mod help;
pub mod rate_limit;
pub mod traits;

pub use arguments::{Argument, ArgumentError, Arguments, Codeblock};
pub use command::Command;
pub use help::HelpCommand;
pub use rate_limit::CooldownRateLimiter;
pub use traits::{CommandHandler, Middleware, MiddlewareAction, RateLimiter};

/// Create the built-in `help` command.
pub fn create_help_command() -> Command {
    HelpCommand::command()
}
