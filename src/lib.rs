//! 惰性求值、可组合的序列流水线，以及基于它的命令行演示工具`rseq`。

use crate::config::Config;
use std::iter::Peekable;

mod condition;
mod config;
pub mod err;
mod help;
mod input;
mod op;
mod output;
mod parse;
pub(crate) mod print;
pub mod record;
pub mod seq;

pub use err::SeqErr;
pub use record::{Record, records};
pub use seq::source::{FileLines, LineSource, StdinLines};
pub use seq::{Elem, LazySequence};

/// 整数类型
pub type Integer = i64;
/// 浮点数类型
pub type Float = f64;

pub fn run(mut args: Peekable<impl Iterator<Item = String>>) -> Result<(), SeqErr> {
    let configs = parse::args::parse_configs(&mut args);
    if configs.contains(&Config::Help) {
        help::print_help(args.next());
        return Ok(());
    } else if configs.contains(&Config::Version) {
        help::print_version();
        return Ok(());
    }
    let (input, ops, output) = parse::args::parse(args)?;
    if configs.contains(&Config::Verbose) {
        config::print_pipe_info(&input, &ops, &output);
    }
    let mut seq = input.try_into_seq()?;
    for op in ops {
        seq = op.wrap(seq, &configs)?;
    }
    if configs.contains(&Config::DryRun) { Ok(()) } else { output.handle(seq, &configs) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_line(line: &str) -> Result<(), SeqErr> {
        run(line.split_whitespace().map(String::from).collect::<Vec<_>>().into_iter().peekable())
    }

    #[test]
    fn test_run() {
        assert_eq!(Ok(()), run_line(":gen 1,20 :filter num 5,15 :skip 2 :limit 3 :join"));
        assert_eq!(Ok(()), run_line("-n :of b A a :distinct :sort desc :count"));
    }

    #[test]
    fn test_run_reports_errors() {
        assert!(matches!(run_line(":of a :limit -1"), Err(SeqErr::InvalidArgument { op: "limit", .. })));
        assert!(matches!(run_line(":of a :count extra"), Err(SeqErr::UnknownArgs { .. })));
        assert!(matches!(run_line(":gen 0,3,0"), Err(SeqErr::UnexpectedRemaining { .. })));
    }

    #[test]
    fn test_dry_run_never_opens_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt").display().to_string();
        assert_eq!(Ok(()), run_line(&format!("-d :file {missing} :upper :count")));
        assert!(matches!(run_line(&format!(":file {missing} :count")), Err(SeqErr::OpenInputErr { .. })));
    }

    #[test]
    fn test_run_malformed_records() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Sean/a\nbroken\n").unwrap();
        let path = file.path().display().to_string();
        assert_eq!(
            Err(SeqErr::MalformedRecord { line_no: 2, line: "broken".to_string() }),
            run_line(&format!(":records {path} :count"))
        );
        assert_eq!(Ok(()), run_line(&format!(":records {path} :limit 1 :count")));
    }
}
