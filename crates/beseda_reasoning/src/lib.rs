pub mod dispatcher;
pub mod patterns;

pub use dispatcher::{is_exit_command, Dispatcher, Route};
pub use patterns::{standard_rules, Handler, ResponseSpec, Rule};
