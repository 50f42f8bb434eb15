use std::{
    env,
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::{fs, process::Command};

use crate::{
    clipboard,
    error::{Error, Result},
    problem::writer::{input_file, output_file},
    settings::{self, Config},
};

use self::verdict::{Report, Verdict};

pub mod verdict;

/// Executable the compile command is expected to produce
pub const EXECUTABLE: &str = "a.out";

/*
    Flow of `ru test`

    problem dir check ──► load compile command ──► compile <dir>.cpp once
                                                        │
    ┌──────────────── for i = 0, 1, 2, ... ◄────────────┘
    │
    └──► out<i>.txt missing? ──► done
         run ./a.out < in<i>.txt ──► compare with out<i>.txt ──► PASSED / FAILED
*/

/// Compiles the solution of the current problem directory and runs it against every sample
pub async fn test(config: &Config, copy: bool) -> Result<Report> {
    println!("Running tests...");

    let dir = env::current_dir()?;
    let problem = problem_name(&dir)?;

    let command = settings::load_compile_command(&config.compile_command_path()?).await?;
    compile(&dir, &problem, &command).await?;

    let report = run_tests(&dir).await?;
    report.print_summary();

    if copy && report.all_passed() {
        let source = fs::read(source_file(&dir, &problem)).await?;
        clipboard::copy(&source).await?;
        println!("Copied {}.cpp to the clipboard", problem);
    }

    Ok(report)
}

/// A problem directory is named after the problem's single letter
pub fn problem_name(dir: &Path) -> Result<String> {
    let name = dir
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| name.chars().count() == 1)
        .ok_or_else(|| Error::NotAProblemDirectory(dir.to_path_buf()))?;
    Ok(name.to_string())
}

#[inline]
fn source_file(dir: &Path, problem: &str) -> PathBuf {
    dir.join(format!("{}.cpp", problem))
}

/// Splits a stored command like `g++ -O2 -std=c++17` into program and arguments
pub fn split_command(command: &str) -> Result<(String, Vec<String>)> {
    let mut parts = shlex::split(command)
        .ok_or_else(|| Error::InvalidCompileCommand(command.to_string()))?
        .into_iter();
    let program = parts.next().ok_or(Error::EmptyCompileCommand)?;
    Ok((program, parts.collect()))
}

/// Runs the compile command on `<problem>.cpp`, compiler output goes straight to the terminal
pub async fn compile(dir: &Path, problem: &str, command: &str) -> Result<()> {
    let (program, args) = split_command(command)?;
    debug!("Compiling {}.cpp with {} {:?}", problem, program, args);

    let status = Command::new(&program)
        .args(&args)
        .arg(format!("{}.cpp", problem))
        .current_dir(dir)
        .status()
        .await?;

    if !status.success() {
        return Err(Error::CompileFailed(status));
    }
    Ok(())
}

/// Runs the compiled executable once per stored sample, stopping at the first missing sample
pub async fn run_tests(dir: &Path) -> Result<Report> {
    let mut report = Report::default();

    for index in 0.. {
        let expected = match fs::read(dir.join(output_file(index))).await {
            Ok(expected) => expected,
            Err(e) => {
                trace!("Stopping after {} tests: {}", index, e);
                break;
            }
        };
        let input = match fs::File::open(dir.join(input_file(index))).await {
            Ok(input) => input.into_std().await,
            Err(e) => {
                trace!("Stopping after {} tests: {}", index, e);
                break;
            }
        };

        let output = Command::new(dir.join(EXECUTABLE))
            .current_dir(dir)
            .stdin(Stdio::from(input))
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await?;
        if !output.status.success() {
            return Err(Error::RunFailed {
                test: index,
                status: output.status,
            });
        }

        let verdict = Verdict::judge(expected, output.stdout);
        verdict.print();
        report.push(verdict);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letter_directories_are_problems() {
        assert_eq!(problem_name(Path::new("/contest/A")).unwrap(), "A");
        assert!(matches!(
            problem_name(Path::new("/contest/AB")),
            Err(Error::NotAProblemDirectory(_))
        ));
        assert!(problem_name(Path::new("/")).is_err());
    }

    #[test]
    fn split_command_handles_quotes() {
        let (program, args) = split_command("g++ -O2 -D'NAME=a b'").unwrap();
        assert_eq!(program, "g++");
        assert_eq!(args, vec!["-O2".to_string(), "-DNAME=a b".to_string()]);
    }

    #[test]
    fn split_command_rejects_blank_and_unbalanced() {
        assert!(matches!(split_command("   "), Err(Error::EmptyCompileCommand)));
        assert!(matches!(
            split_command("g++ \"unterminated"),
            Err(Error::InvalidCompileCommand(_))
        ));
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use std::fs;

        // "Compiles" by copying the shell script solution to a.out
        const COMPILE: &str = "sh -c 'cp \"$0\" a.out && chmod +x a.out'";

        fn problem_dir(solution: &str, tests: &[(&str, &str)]) -> tempfile::TempDir {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("A.cpp"), solution).unwrap();
            for (index, (input, output)) in tests.iter().enumerate() {
                fs::write(dir.path().join(input_file(index)), input).unwrap();
                fs::write(dir.path().join(output_file(index)), output).unwrap();
            }
            dir
        }

        #[tokio::test]
        async fn echo_solution_passes_every_test() {
            let dir = problem_dir("#!/bin/sh\ncat\n", &[("1 2\n", "1 2\n"), ("x", "x")]);
            compile(dir.path(), "A", COMPILE).await.unwrap();

            let report = run_tests(dir.path()).await.unwrap();
            assert_eq!(report.total(), 2);
            assert!(report.all_passed());
        }

        #[tokio::test]
        async fn wrong_output_is_reported_with_both_sides() {
            let dir = problem_dir("#!/bin/sh\necho wrong\n", &[("", "right\n")]);
            compile(dir.path(), "A", COMPILE).await.unwrap();

            let report = run_tests(dir.path()).await.unwrap();
            assert_eq!(
                report.verdicts(),
                &[Verdict::Failed {
                    expected: b"right\n".to_vec(),
                    actual: b"wrong\n".to_vec()
                }]
            );
        }

        #[tokio::test]
        async fn no_samples_is_trivially_successful() {
            let dir = problem_dir("#!/bin/sh\ncat\n", &[]);
            compile(dir.path(), "A", COMPILE).await.unwrap();

            let report = run_tests(dir.path()).await.unwrap();
            assert_eq!(report.total(), 0);
        }

        #[tokio::test]
        async fn stops_at_first_gap() {
            let dir = problem_dir("#!/bin/sh\ncat\n", &[("a", "a"), ("b", "b"), ("c", "c")]);
            fs::remove_file(dir.path().join(output_file(1))).unwrap();
            compile(dir.path(), "A", COMPILE).await.unwrap();

            let report = run_tests(dir.path()).await.unwrap();
            assert_eq!(report.total(), 1);
        }

        #[tokio::test]
        async fn missing_input_also_stops() {
            let dir = problem_dir("#!/bin/sh\ncat\n", &[("a", "a")]);
            fs::remove_file(dir.path().join(input_file(0))).unwrap();
            compile(dir.path(), "A", COMPILE).await.unwrap();

            let report = run_tests(dir.path()).await.unwrap();
            assert_eq!(report.total(), 0);
        }

        #[tokio::test]
        async fn failing_compiler_aborts() {
            let dir = problem_dir("int main() {}", &[("", "")]);
            let result = compile(dir.path(), "A", "false").await;
            assert!(matches!(result, Err(Error::CompileFailed(_))));
        }

        #[tokio::test]
        async fn crashing_solution_aborts() {
            let dir = problem_dir("#!/bin/sh\nexit 3\n", &[("", "")]);
            compile(dir.path(), "A", COMPILE).await.unwrap();

            let result = run_tests(dir.path()).await;
            assert!(matches!(result, Err(Error::RunFailed { test: 0, .. })));
        }
    }
}
