mod app_helper;
pub(crate) use app_helper::AppHelper;

mod authors_command;
pub(crate) use authors_command::AuthorsCommand;

mod check_command;
pub(crate) use check_command::CheckCommand;

mod cli_manager;

mod command;
pub(crate) use command::Command;

mod common;

mod len_command;
pub(crate) use len_command::LenCommand;

mod list_command;
pub(crate) use list_command::ListCommand;

mod strip_command;
pub(crate) use strip_command::StripCommand;

mod writable_string;
