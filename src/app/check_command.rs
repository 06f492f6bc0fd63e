use super::{cli_manager, command::Command, common, writable_string::WritableString};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};
use log::{info, warn};
use lptools::{analysis, analysis::ProgramStatistics, symbols::SymbolTable};

const CMD_NAME: &str = "check";

pub(crate) struct CheckCommand;

impl CheckCommand {
    pub(crate) fn new() -> Self {
        CheckCommand
    }
}

impl<'a> Command<'a> for CheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks input programs for errors")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_arg())
            .arg(common::dimacs_arg())
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let mut symbols = SymbolTable::default();
        let mut instance = common::read_instance(arg_matches, &mut symbols)?;
        let mut summary = WritableString::default();
        ProgramStatistics::new(&instance)
            .write_summary(&mut summary, common::input_name(arg_matches))?;
        summary.lines().for_each(|l| info!("{}", l));
        if instance.is_cnf() {
            return Ok(());
        }
        let (program, atoms) = instance.parts_mut();
        analysis::mark_occurrences(program, atoms)?;
        if analysis::check_negative_invisible(program, atoms)? {
            warn!("some anonymous atoms occur negatively or in the heads of choice and disjunctive rules");
        }
        Ok(())
    }
}
