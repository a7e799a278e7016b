use crate::condition::Condition;
use crate::config::{Config, is_nocase};
use crate::err::SeqErr;
use crate::seq::LazySequence;
use cmd_help::CmdHelp;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, PartialEq, CmdHelp)]
pub(crate) enum Output {
    /// :to out     逐个输出到标准输出。
    ///             未指定终止操作时的默认输出。
    StdOut,
    /// :count      输出数据数量。
    Count,
    /// :join       以分隔符连接全部数据后输出。
    ///             :join[ <delimiter>]
    ///                 <delimiter> 分隔字符串，可选，未指定时为", "。
    ///             例如：
    ///                 :join
    ///                 :join ,
    Join(String),
    /// :group      按照字符数分组后输出，每组一行，按照字符数升序。
    ///             :group len
    GroupLen,
    /// :partition  按照条件将数据分为两组后输出，先输出不满足条件的一组。
    ///             :partition <condition>
    ///                 <condition> 条件表达式，参考`-h cond`。
    ///             例如：
    ///                 :partition reg 'T.*'
    Partition(Condition),
}

impl Output {
    pub(crate) fn new_std_out() -> Output {
        Output::StdOut
    }

    pub(crate) fn handle(self, seq: LazySequence<String>, configs: &[Config]) -> Result<(), SeqErr> {
        self.write_to(seq, &mut std::io::stdout().lock(), configs)
    }

    fn write_to(self, mut seq: LazySequence<String>, out: &mut impl Write, configs: &[Config]) -> Result<(), SeqErr> {
        match self {
            Output::StdOut => seq.try_for_each(|item| write_line(out, &item)),
            Output::Count => write_line(out, &seq.count()?.to_string()),
            Output::Join(delimiter) => write_line(out, &seq.joining(&delimiter)?),
            Output::GroupLen => {
                let groups = seq.group_by(|item| item.chars().count())?;
                for (len, items) in groups.into_iter().collect::<BTreeMap<_, _>>() {
                    write_line(out, &format!("{len}: [{}]", items.join(", ")))?;
                }
                Ok(())
            }
            Output::Partition(cond) => {
                let cond = if is_nocase(false, configs) { cond.nocase()? } else { cond };
                let (rejected, accepted) = seq.partition_by(|item| cond.test(item))?;
                write_line(out, &format!("false: [{}]", rejected.join(", ")))?;
                write_line(out, &format!("true: [{}]", accepted.join(", ")))
            }
        }
    }
}

fn write_line(out: &mut impl Write, line: &str) -> Result<(), SeqErr> {
    writeln!(out, "{line}").map_err(|err| SeqErr::WriteOutputErr(err.to_string()))
}
