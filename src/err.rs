use cmd_help::CmdHelp;
use std::process::{ExitCode, Termination};
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq, CmdHelp)]
pub enum SeqErr {
    /// 1   非法参数，例如`limit`/`skip`为负数，或`range`步长为0。
    #[error("[Invalid Arg] Bad value `{value}` in argument `{arg}` of `{op}`")]
    InvalidArgument { op: &'static str, arg: &'static str, value: String },

    /// 2   序列已被终止操作消费，不能再次执行终止操作。
    #[error("[Consumed] The sequence has already been consumed by a terminal operation")]
    AlreadyConsumed,

    /// 3   `to_map`未指定合并函数时出现了重复的键。
    #[error("[Duplicate Key] Duplicate key `{key}` (attempted merging values `{existing}` and `{incoming}`)")]
    DuplicateKey { key: String, existing: String, incoming: String },

    /// 4   记录行格式错误，必须为`<name>/<descriptor>`。
    #[error("[Malformed Record] Line `{line_no}` is not a `<name>/<descriptor>` record: `{line}`")]
    MalformedRecord {
        /// 从1开始的行号，0表示没有行号上下文（例如直接解析单行文本）
        line_no: usize,
        line: String,
    },

    /// 5   打开输入失败。
    #[error("[Input] Open input `{input}` error: {err}")]
    OpenInputErr { input: String, err: String },

    /// 6   读取输入失败。
    #[error("[Input] Read line `{line_no}` of input `{input}` error: {err}")]
    ReadInputErr { input: String, line_no: usize, err: String },

    /// 7   命令参数解析失败。
    #[error("[Arg Parse Err] Unable to parse `{arg_value}` in argument `{arg}` of cmd `{cmd}`, error: {error}")]
    ArgParseErr { cmd: &'static str, arg: &'static str, arg_value: String, error: String },

    /// 8   命令参数解析后有多余的内容。
    #[error("[Bad Arg] Unexpected remaining value `{remaining}` in argument `{arg}` of cmd `{cmd}`")]
    UnexpectedRemaining { cmd: &'static str, arg: &'static str, remaining: String },

    /// 9   缺少必选的命令参数。
    #[error("[Missing Arg] Missing argument `{arg}` of cmd `{cmd}`")]
    MissingArg { cmd: &'static str, arg: &'static str },

    /// 10  无法识别的命令参数。
    #[error("[Bad Arg] Unknown arguments: {args:?}")]
    UnknownArgs { args: Vec<String> },

    /// 11  正则表达式错误。
    #[error("[Bad Arg] Invalid regex `{reg}`: {err}")]
    ParseRegexErr { reg: String, err: String },

    /// 12  输出结果失败。
    #[error("[Output] Write result error: {0}")]
    WriteOutputErr(String),
}

impl Termination for SeqErr {
    fn report(self) -> ExitCode {
        crate::println_err!("{}", self);
        ExitCode::from(self.exit_code())
    }
}

impl SeqErr {
    /// 打印错误并以对应的退出码结束进程。
    pub fn termination(self) -> ! {
        let exit_code = self.exit_code();
        self.report();
        std::process::exit(exit_code as i32);
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            SeqErr::InvalidArgument { .. } => 1,
            SeqErr::AlreadyConsumed => 2,
            SeqErr::DuplicateKey { .. } => 3,
            SeqErr::MalformedRecord { .. } => 4,
            SeqErr::OpenInputErr { .. } => 5,
            SeqErr::ReadInputErr { .. } => 6,
            SeqErr::ArgParseErr { .. } => 7,
            SeqErr::UnexpectedRemaining { .. } => 8,
            SeqErr::MissingArg { .. } => 9,
            SeqErr::UnknownArgs { .. } => 10,
            SeqErr::ParseRegexErr { .. } => 11,
            SeqErr::WriteOutputErr(_) => 12,
        }
    }

    /// 是否为底层输入源的I/O错误（打开或读取失败）。
    pub fn is_io_failure(&self) -> bool {
        matches!(self, SeqErr::OpenInputErr { .. } | SeqErr::ReadInputErr { .. })
    }

    pub(crate) fn invalid_arg(op: &'static str, arg: &'static str, value: impl ToString) -> SeqErr {
        SeqErr::InvalidArgument { op, arg, value: value.to_string() }
    }
}
