use super::{cli_manager, command::Command};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};

const CMD_NAME: &str = "authors";

/// Prints the name and version of the toolbox, followed by its authors.
pub(crate) struct AuthorsCommand<'a> {
    package: &'a str,
    version: &'a str,
    authors: &'a str,
}

impl<'a> AuthorsCommand<'a> {
    pub(crate) fn new(package: &'a str, version: &'a str, authors: &'a str) -> Self {
        AuthorsCommand {
            package,
            version,
            authors,
        }
    }

    /// Cargo joins the authors with colons; they are listed on a single line, separated by commas.
    fn credits(&self) -> String {
        let authors = self
            .authors
            .split(':')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect::<Vec<&str>>()
            .join(", ");
        format!("{} {}\n{}\n", self.package, self.version, authors)
    }
}

impl<'a> Command<'a> for AuthorsCommand<'a> {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Prints the version of lptools and the names of its authors")
            .setting(AppSettings::DisableVersion)
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, _arg_matches: &ArgMatches<'_>) -> Result<()> {
        print!("{}", self.credits());
        Ok(())
    }
}
