use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::predicate;

const PROGRAM: &str =
    "1 1 1 1 2\n3 1 3 0 0\n0\n1 a\n2 b\n3 c\n0\nB+\n1\n0\nB-\n2\n0\nE\n3\n0\n1\n";

fn test_len(content: &str, args: &[&str], expected: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("lptools")?;
    cmd.arg("len")
        .args(args)
        .arg("--logging-level")
        .arg("off")
        .write_stdin(content);
    cmd.assert().success().stdout(predicate::eq(expected));
    Ok(())
}

#[test]
fn test_len_summary() -> Result<(), Box<dyn std::error::Error>> {
    test_len(
        PROGRAM,
        &[],
        "Program - in numbers:\n - 3 atom(s)\n - 2 rule(s)\n   1 normal\n   1 choice\n - 13 integer(s) in internal format\n",
    )
}

#[test]
fn test_len_summary_with_file_name() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("program.sm")?;
    file.write_str(PROGRAM)?;
    let mut cmd = Command::cargo_bin("lptools")?;
    cmd.arg("len").arg("-f").arg(file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("program.sm in numbers:"));
    file.close()?;
    Ok(())
}

#[test]
fn test_len_selected_numbers() -> Result<(), Box<dyn std::error::Error>> {
    test_len(PROGRAM, &["--atoms", "--rules", "--integers"], "3 2 13\n")
}

#[test]
fn test_len_rule_type() -> Result<(), Box<dyn std::error::Error>> {
    test_len(PROGRAM, &["--rule-type", "choice"], "1\n")?;
    test_len(PROGRAM, &["--rule-type", "weight"], "0\n")
}

#[test]
fn test_len_cnf() -> Result<(), Box<dyn std::error::Error>> {
    test_len("p cnf 3 2\n1 -3 0\n2 0\n", &["--dimacs", "--rules", "--integers"], "2 5\n")
}

#[test]
fn test_len_unknown_rule_type() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("lptools")?;
    cmd.arg("len").arg("--rule-type").arg("foo").write_stdin(PROGRAM);
    cmd.assert().failure();
    Ok(())
}
