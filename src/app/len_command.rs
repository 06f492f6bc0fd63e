use super::{cli_manager, command::Command, common};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use lptools::{analysis::ProgramStatistics, rules::RuleType, symbols::SymbolTable};
use std::{io::Write, str::FromStr};
use strum::VariantNames;

const CMD_NAME: &str = "len";

const ARG_ATOMS: &str = "ATOMS";
const ARG_RULES: &str = "RULES";
const ARG_RULE_TYPE: &str = "RULE_TYPE";
const ARG_INTEGERS: &str = "INTEGERS";

pub(crate) struct LenCommand;

impl LenCommand {
    pub(crate) fn new() -> Self {
        LenCommand
    }
}

impl<'a> Command<'a> for LenCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Measures the size of a program or a CNF formula")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_arg())
            .arg(common::dimacs_arg())
            .arg(
                Arg::with_name(ARG_ATOMS)
                    .long("atoms")
                    .takes_value(false)
                    .help("print the number of atoms"),
            )
            .arg(
                Arg::with_name(ARG_RULES)
                    .long("rules")
                    .takes_value(false)
                    .help("print the number of rules"),
            )
            .arg(
                Arg::with_name(ARG_RULE_TYPE)
                    .long("rule-type")
                    .empty_values(false)
                    .multiple(false)
                    .possible_values(RuleType::VARIANTS)
                    .help("print the number of rules of this type"),
            )
            .arg(
                Arg::with_name(ARG_INTEGERS)
                    .long("integers")
                    .takes_value(false)
                    .help("print the number of integers in the internal format"),
            )
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let rule_type = arg_matches
            .value_of(ARG_RULE_TYPE)
            .map(|t| RuleType::from_str(t).map_err(|_| anyhow!(r#"unknown rule type "{}""#, t)))
            .transpose()
            .context("while parsing the command line")?;
        let mut symbols = SymbolTable::default();
        let instance = common::read_instance(arg_matches, &mut symbols)?;
        let stats = ProgramStatistics::new(&instance);
        let mut numbers = Vec::new();
        if arg_matches.is_present(ARG_ATOMS) {
            numbers.push(stats.atoms());
        }
        if arg_matches.is_present(ARG_RULES) {
            numbers.push(stats.rules());
        }
        if let Some(t) = rule_type {
            numbers.push(stats.rules_of_type(t));
        }
        if arg_matches.is_present(ARG_INTEGERS) {
            numbers.push(stats.integers());
        }
        common::with_stdout(|out| {
            if numbers.is_empty() {
                return stats.write_summary(out, common::input_name(arg_matches));
            }
            let line = numbers
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<String>>()
                .join(" ");
            writeln!(out, "{}", line).context("while writing the sizes")
        })
    }
}
