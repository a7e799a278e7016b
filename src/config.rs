use crate::input::Input;
use crate::op::Op;
use crate::output::Output;
use cmd_help::CmdHelp;
use itertools::Itertools;

#[derive(Debug, Eq, PartialEq, CmdHelp)]
pub(crate) enum Config {
    /// -V,--version    打印版本信息。
    Version,
    /// -h,--help       打印帮助信息。
    ///                 -h|--help[ options|input|op|output|cond|code]
    ///                     options 打印选项帮助信息。
    ///                     input   打印数据输入命令帮助信息。
    ///                     op      打印中间操作命令帮助信息。
    ///                     output  打印终止操作命令帮助信息。
    ///                     cond    打印条件表达式帮助信息。
    ///                     code    打印退出码帮助信息。
    ///                     未指定则打印全部帮助信息。
    Help,
    /// -v,--verbose    执行之前打印流水线详情。
    Verbose,
    /// -d,--dry-run    仅解析流水线，不执行。
    DryRun,
    /// -n,--nocase     全局忽略大小写，影响`:distinct`、`:sort`和`reg`条件。
    Nocase,
}

#[inline]
pub(crate) fn is_nocase(nocase: bool, configs: &[Config]) -> bool {
    nocase || configs.contains(&Config::Nocase)
}

pub(crate) fn print_pipe_info(input: &Input, ops: &[Op], output: &Output) {
    crate::println_info!("Input:\n    {:?}", input);
    crate::println_info!("Op:\n{}", ops.iter().map(|op| format!("    {:?}", op)).join("\n"));
    crate::println_info!("Output:\n    {:?}", output);
}
