use crate::err::SeqErr;
use crate::seq::LazySequence;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

/// 以`/`分隔的两字段记录：`<name>/<descriptor>`。
///
/// 相等、哈希与排序均基于全部字段。
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Record {
    name: String,
    descriptor: String,
}

impl Record {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Record {
        Record { name: name.into(), descriptor: descriptor.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// 解析第`line_no`行（从1开始），字段数不为2时返回[`SeqErr::MalformedRecord`]。
    pub fn parse_line(line: &str, line_no: usize) -> Result<Record, SeqErr> {
        let mut fields = line.split('/');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(name), Some(descriptor), None) => Ok(Record::new(name, descriptor)),
            _ => Err(SeqErr::MalformedRecord { line_no, line: line.to_string() }),
        }
    }
}

/// 不带行号上下文的解析，错误中的行号为0。
impl FromStr for Record {
    type Err = SeqErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Record::parse_line(s, 0)
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.descriptor)
    }
}

/// 逐行读取文件并解析为记录，格式错误的行在被拉取时以`Err`元素出现。
pub fn records(path: impl AsRef<Path>) -> LazySequence<Record> {
    let mut line_no = 0;
    LazySequence::from_lines(path).try_map(move |line| {
        line_no += 1;
        Record::parse_line(&line, line_no)
    })
}
