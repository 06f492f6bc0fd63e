use anyhow::{Context, Result};
use clap::{Arg, ArgMatches};
use log::{info, warn};
use lptools::{
    io::{DimacsReader, Instance, InstanceReader, SmodelsReader},
    symbols::SymbolTable,
};
use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};

pub(crate) const ARG_INPUT: &str = "INPUT";

const STDIN: &str = "-";

pub(crate) fn input_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help(r#"the input file that contains the program ("-" or none for stdin)"#)
        .required(false)
}

pub(crate) const ARG_DIMACS: &str = "DIMACS";

pub(crate) fn dimacs_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_DIMACS)
        .long("dimacs")
        .takes_value(false)
        .help("read the input as a CNF formula in the DIMACS format")
}

/// Returns the name of the input, as given by the user.
pub(crate) fn input_name<'a>(arg_matches: &'a ArgMatches<'_>) -> &'a str {
    arg_matches.value_of(ARG_INPUT).unwrap_or(STDIN)
}

/// Reads the input given by the CLI arguments, with the reader they select.
pub(crate) fn read_instance(arg_matches: &ArgMatches<'_>, symbols: &mut SymbolTable) -> Result<Instance> {
    let mut reader: Box<dyn InstanceReader> = if arg_matches.is_present(ARG_DIMACS) {
        Box::<DimacsReader>::default()
    } else {
        Box::<SmodelsReader>::default()
    };
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    let file = input_name(arg_matches);
    let read_result = if file == STDIN {
        info!("reading input from stdin");
        let stdin = io::stdin();
        let mut stdin_reader = BufReader::new(stdin.lock());
        reader.read(&mut stdin_reader, symbols)
    } else {
        let canonicalized = canonicalize_file_path(file)?;
        info!("reading input file {:?}", canonicalized);
        let mut file_reader = BufReader::new(
            File::open(&canonicalized)
                .with_context(|| format!(r#"while opening file "{}""#, file))?,
        );
        reader.read(&mut file_reader, symbols)
    };
    let instance = read_result.with_context(|| format!(r#"while reading "{}""#, file))?;
    info!(
        "the {} has {} atom(s) and {} rule(s)",
        if instance.is_cnf() { "formula" } else { "program" },
        instance.atoms().table_size(),
        instance.program().number_of_rules(),
    );
    Ok(instance)
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

/// Runs a function writing on the standard output.
pub(crate) fn with_stdout<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    f(&mut writer)?;
    writer.flush().context("while writing on the standard output")
}
