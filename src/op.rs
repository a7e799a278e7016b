use crate::condition::Condition;
use crate::config::{Config, is_nocase};
use crate::err::SeqErr;
use crate::seq::LazySequence;
use crate::{Float, Integer};
use cmd_help::CmdHelp;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use unicase::UniCase;

#[derive(Debug, PartialEq, CmdHelp)]
pub(crate) enum Op {
    /* **************************************** 访问 **************************************** */
    /// :peek       数据流经时打印到标准输出，不改变数据。
    ///             :peek
    Peek,
    /* **************************************** 转换 **************************************** */
    /// :upper      转为大写。
    /// :lower      转为小写。
    Case(CaseArg),
    /// :len        转为字符数。
    Len,
    /* **************************************** 减少 **************************************** */
    /// :filter     根据指定条件选择数据保留，其他数据丢弃。
    ///             :filter <condition>
    ///                 <condition> 条件表达式，参考`-h cond`。
    /// :drop       根据指定条件选择数据丢弃，其他数据保留。
    ///             :drop <condition>
    ///                 <condition> 条件表达式，参考`-h cond`。
    /// :take while 根据指定条件选择数据持续保留，直到条件首次不满足，之后不再读取数据。
    ///             :take while <condition>
    /// :drop while 根据指定条件选择数据持续丢弃，直到条件首次不满足。
    ///             :drop while <condition>
    ///             例如：
    ///                 :filter len 3,
    ///                 :drop empty
    ///                 :take while num ,100
    TakeDrop { mode: TakeDropMode, cond: Condition },
    /// :distinct   去重，保留首次出现的数据。
    ///             :distinct[ nocase]
    ///                 nocase  去重时忽略大小写，可选，未指定时不忽略大小写。
    Distinct(bool /*nocase*/),
    /// :limit      最多保留前n个数据，之后不再读取数据。
    ///             :limit <n>
    ///                 <n> 数量，不能为负数，必选。
    Limit(Integer),
    /// :skip       丢弃前n个数据。
    ///             :skip <n>
    ///                 <n> 数量，不能为负数，必选。
    Skip(Integer),
    /* **************************************** 调整位置 **************************************** */
    /// :sort       排序，需要缓存全部数据。
    ///             :sort[ num|nocase|random][ desc]
    ///                 num     按照数值排序，无法解析为数值的数据总是排在最后。
    ///                 nocase  忽略大小写排序。
    ///                 random  随机排序，不支持逆序。
    ///                 desc    逆序排序，可选，未指定时正序排序。
    ///             例如：
    ///                 :sort
    ///                 :sort desc
    ///                 :sort num desc
    ///                 :sort nocase
    ///                 :sort random
    Sort { sort_by: SortBy, desc: bool },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum CaseArg {
    Upper,
    Lower,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum TakeDropMode {
    Filter,
    Drop,
    TakeWhile,
    DropWhile,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum SortBy {
    Text(bool /*nocase*/),
    Num,
    Random,
}

impl Op {
    pub(crate) fn new_take_drop(mode: TakeDropMode, cond: Condition) -> Op {
        Op::TakeDrop { mode, cond }
    }
    pub(crate) fn new_sort(sort_by: SortBy, desc: bool) -> Op {
        Op::Sort { sort_by, desc }
    }

    pub(crate) fn wrap(self, seq: LazySequence<String>, configs: &[Config]) -> Result<LazySequence<String>, SeqErr> {
        match self {
            Op::Peek => Ok(seq.peek(|item| crate::println_notice!("{item}"))),
            Op::Case(CaseArg::Upper) => Ok(seq.map(|item| item.to_uppercase())),
            Op::Case(CaseArg::Lower) => Ok(seq.map(|item| item.to_lowercase())),
            Op::Len => Ok(seq.map(|item| item.chars().count().to_string())),
            Op::TakeDrop { mode, cond } => {
                let cond = if is_nocase(false, configs) { cond.nocase()? } else { cond };
                Ok(match mode {
                    TakeDropMode::Filter => seq.filter(move |item| cond.test(item)),
                    TakeDropMode::Drop => seq.filter(move |item| !cond.test(item)),
                    TakeDropMode::TakeWhile => seq.take_while(move |item| cond.test(item)),
                    TakeDropMode::DropWhile => seq.drop_while(move |item| cond.test(item)),
                })
            }
            Op::Distinct(nocase) => {
                if is_nocase(nocase, configs) {
                    Ok(seq.distinct_by(|item| UniCase::new(item.clone())))
                } else {
                    Ok(seq.distinct())
                }
            }
            Op::Limit(n) => seq.limit(n),
            Op::Skip(n) => seq.skip(n),
            Op::Sort { sort_by, desc } => Ok(match sort_by {
                SortBy::Num => seq.sorted_by(move |a, b| cmp_num(a, b, desc)),
                SortBy::Text(nocase) => {
                    if is_nocase(nocase, configs) {
                        seq.sorted_by(move |a, b| with_desc(UniCase::new(a).cmp(&UniCase::new(b)), desc))
                    } else {
                        seq.sorted_by(move |a, b| with_desc(a.cmp(b), desc))
                    }
                }
                SortBy::Random => {
                    seq.map(|item| (rand::random::<u64>(), item)).sorted_by(|a, b| a.0.cmp(&b.0)).map(|(_, item)| item)
                }
            }),
        }
    }
}

#[inline]
fn with_desc(ordering: Ordering, desc: bool) -> Ordering {
    if desc { ordering.reverse() } else { ordering }
}

fn num_key(item: &str) -> Option<OrderedFloat<Float>> {
    item.trim().parse::<Float>().ok().filter(|f| f.is_finite()).map(OrderedFloat)
}

/// 无法解析为数值的数据不论正序逆序总是排在最后，彼此之间保持原有顺序。
fn cmp_num(a: &str, b: &str, desc: bool) -> Ordering {
    match (num_key(a), num_key(b)) {
        (Some(a), Some(b)) => with_desc(a.cmp(&b), desc),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
