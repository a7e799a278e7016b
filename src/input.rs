use crate::err::SeqErr;
use crate::record::records;
use crate::seq::LazySequence;
use crate::Integer;
use cmd_help::CmdHelp;

#[derive(Debug, Eq, PartialEq, CmdHelp)]
pub(crate) enum Input {
    /// :in         从标准输入读取数据，按行处理。
    ///             未指定数据输入时的默认输入。
    StdIn,
    /// :file       从文件读取数据，按行处理，首次拉取数据时才打开文件。
    ///             :file <file_name>
    ///                 <file_name> 文件路径，必选。
    ///             例如：
    ///                 :file input.txt
    File { file: String },
    /// :records    从文件读取`<name>/<descriptor>`格式的记录，格式错误的行会终止执行。
    ///             :records <file_name>
    ///                 <file_name> 文件路径，必选。
    ///             例如：
    ///                 :records people.txt
    Records { file: String },
    /// :of         使用直接字面值作为数据。
    ///             :of <text>[ <text>][...]
    ///                 <text>  字面值，至少指定一个，如果以':'开头，需要使用'::'转义。
    ///             例如：
    ///                 :of line
    ///                 :of line1 line2 line3
    ///                 :of "line 1" "line 2"
    Of { values: Vec<String> },
    /// :gen        生成指定闭区间的整数作为数据。
    ///             :gen <start>[,[<end>][,<step>]]
    ///                 <start> 起始值，包含，必选。
    ///                 <end>   结束值，包含，可选，未指定则为整数最大值。
    ///                 <step>  步长，不能为0，可选，未指定则为1。
    ///                         步长为负时从结束值开始逆序生成。
    ///             例如：
    ///                 :gen 0
    ///                 :gen 0,10
    ///                 :gen 0,10,2
    ///                 :gen 0,,2
    ///                 :gen 0,10,-1
    Gen { start: Integer, end: Integer, step: Integer },
    /// :repeat     重复字面值作为数据。
    ///             :repeat <value>[ <count>]
    ///                 <value> 需要重复的字面值，必选。
    ///                 <count> 重复次数，可选，未指定则无限重复。
    ///             例如：
    ///                 :repeat abc
    ///                 :repeat abc 10
    Repeat { value: String, count: Option<usize> },
}

impl Input {
    pub(crate) fn new_std_in() -> Input {
        Input::StdIn
    }
    pub(crate) fn new_file(file: String) -> Input {
        Input::File { file }
    }
    pub(crate) fn new_records(file: String) -> Input {
        Input::Records { file }
    }
    pub(crate) fn new_of(values: Vec<String>) -> Input {
        Input::Of { values }
    }
    pub(crate) fn new_gen(start: Integer, end: Integer, step: Integer) -> Input {
        Input::Gen { start, end, step }
    }
    pub(crate) fn new_repeat(value: String, count: Option<usize>) -> Input {
        Input::Repeat { value, count }
    }

    pub(crate) fn try_into_seq(self) -> Result<LazySequence<String>, SeqErr> {
        Ok(match self {
            Input::StdIn => LazySequence::from_stdin(),
            Input::File { file } => LazySequence::from_lines(file),
            Input::Records { file } => records(file).map(|record| record.to_string()),
            Input::Of { values } => LazySequence::from_values(values),
            Input::Gen { start, end, step } => LazySequence::range(start, end, step)?.map(|i| i.to_string()),
            Input::Repeat { value, count } => LazySequence::repeat(value, count),
        })
    }
}
