use super::{cli_manager, command::Command, common};
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use lptools::{
    analysis,
    io::{InstanceHeader, OutputStyle, ProgramWriter},
    symbols::SymbolTable,
};

const CMD_NAME: &str = "strip";

pub(crate) struct StripCommand;

impl StripCommand {
    pub(crate) fn new() -> Self {
        StripCommand
    }
}

impl<'a> Command<'a> for StripCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Removes the rules defining unused anonymous atoms from a Smodels program")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_arg())
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let mut symbols = SymbolTable::default();
        let mut instance = common::read_instance(arg_matches, &mut symbols)?;
        let models = match *instance.header() {
            InstanceHeader::Smodels { models } => models,
            InstanceHeader::Cnf { .. } => return Err(anyhow!("CNF formulas cannot be stripped")),
        };
        let (program, atoms) = instance.parts_mut();
        analysis::mark_occurrences(program, atoms)?;
        analysis::strip_program(program, atoms)?;
        analysis::strip_compute_statement(atoms);
        let writer = ProgramWriter::new(OutputStyle::Smodels);
        common::with_stdout(|out| {
            writer.write_smodels_document(out, instance.program(), instance.atoms(), models)
        })
    }
}
