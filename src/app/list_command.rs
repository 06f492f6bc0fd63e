use super::{cli_manager, command::Command, common};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use lptools::{
    io::{OutputStyle, ProgramWriter},
    symbols::SymbolTable,
};
use std::str::FromStr;
use strum::VariantNames;

const CMD_NAME: &str = "list";

const ARG_STYLE: &str = "STYLE";
const ARG_SYMBOLS: &str = "SYMBOLS";

pub(crate) struct ListCommand;

impl ListCommand {
    pub(crate) fn new() -> Self {
        ListCommand
    }
}

impl<'a> Command<'a> for ListCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Writes a program or a CNF formula in a given style")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_arg())
            .arg(common::dimacs_arg())
            .arg(
                Arg::with_name(ARG_STYLE)
                    .short("s")
                    .long("style")
                    .empty_values(false)
                    .multiple(false)
                    .possible_values(OutputStyle::VARIANTS)
                    .default_value("readable")
                    .help("the output style"),
            )
            .arg(
                Arg::with_name(ARG_SYMBOLS)
                    .long("symbols")
                    .takes_value(false)
                    .help("append the symbol table to programs written in a symbolic style"),
            )
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let style_name = arg_matches.value_of(ARG_STYLE).unwrap_or("readable");
        let style = OutputStyle::from_str(style_name)
            .map_err(|_| anyhow!(r#"unknown style "{}""#, style_name))
            .context("while parsing the command line")?;
        let mut symbols = SymbolTable::default();
        let instance = common::read_instance(arg_matches, &mut symbols)?;
        let writer = ProgramWriter::new(style);
        common::with_stdout(|out| {
            writer.write_listing(out, &instance, arg_matches.is_present(ARG_SYMBOLS))
        })
    }
}
