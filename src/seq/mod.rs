//! 惰性序列流水线：数据源 -> 中间操作链 -> 终止操作。
//!
//! 中间操作只包装迭代器，直到终止操作拉取元素时才会执行。
//! 元素以`Result<T, SeqErr>`的形式在流水线中流动，数据源的错误（读取失败、记录格式错误）
//! 作为`Err`元素原样穿过所有中间操作，由终止操作在遇到时返回。

use crate::Integer;
use crate::err::SeqErr;
use itertools::{Either, Itertools};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::hash::Hash;

pub mod source;
mod terminal;

/// 流水线中的单个元素。
pub type Elem<T> = Result<T, SeqErr>;

type BoxIter<T> = Box<dyn Iterator<Item = Elem<T>>>;

/// 惰性求值、可组合的序列流水线。
///
/// 中间操作按值消耗`self`并返回新的流水线；终止操作取出内部迭代器，
/// 同一个流水线只能执行一次终止操作，再次执行返回[`SeqErr::AlreadyConsumed`]。
pub struct LazySequence<T> {
    iter: Option<BoxIter<T>>,
}

impl<T: 'static> LazySequence<T> {
    /// 以元素迭代器构造流水线，元素可以携带错误。
    pub fn new(iter: impl Iterator<Item = Elem<T>> + 'static) -> LazySequence<T> {
        LazySequence { iter: Some(Box::new(iter)) }
    }

    /// 是否已经被终止操作消费。
    pub fn is_consumed(&self) -> bool {
        self.iter.is_none()
    }

    /// 取出内部迭代器，仅供终止操作使用。
    fn drain(&mut self) -> Result<BoxIter<T>, SeqErr> {
        self.iter.take().ok_or(SeqErr::AlreadyConsumed)
    }

    /// 在当前迭代器之上包装一个中间操作，已消费的流水线保持已消费状态。
    fn stage<R, I>(self, wrap: impl FnOnce(BoxIter<T>) -> I) -> LazySequence<R>
    where
        I: Iterator<Item = Elem<R>> + 'static,
    {
        LazySequence { iter: self.iter.map(|iter| Box::new(wrap(iter)) as BoxIter<R>) }
    }

    /* **************************************** 转换 **************************************** */

    /// 一对一转换，保持顺序。
    pub fn map<R: 'static>(self, mut f: impl FnMut(T) -> R + 'static) -> LazySequence<R> {
        self.stage(move |iter| iter.map(move |elem| elem.map(&mut f)))
    }

    /// 可失败的一对一转换，转换失败的元素变为`Err`元素。
    pub fn try_map<R: 'static>(self, mut f: impl FnMut(T) -> Result<R, SeqErr> + 'static) -> LazySequence<R> {
        self.stage(move |iter| iter.map(move |elem| elem.and_then(&mut f)))
    }

    /// 一对多转换，将每个元素展开为一个子序列。
    pub fn flat_map<R, I>(self, mut f: impl FnMut(T) -> I + 'static) -> LazySequence<R>
    where
        R: 'static,
        I: IntoIterator<Item = R>,
        I::IntoIter: 'static,
    {
        self.stage(move |iter| {
            iter.flat_map(move |elem| match elem {
                Ok(item) => Either::Left(f(item).into_iter().map(Ok)),
                Err(err) => Either::Right(std::iter::once(Err(err))),
            })
        })
    }

    /// 对每个元素执行副作用，不改变序列，常用于调试观察。
    pub fn peek(self, mut f: impl FnMut(&T) + 'static) -> LazySequence<T> {
        self.stage(move |iter| {
            iter.inspect(move |elem| {
                if let Ok(item) = elem {
                    f(item)
                }
            })
        })
    }

    /* **************************************** 减少 **************************************** */

    /// 保留满足条件的元素，保持顺序。
    pub fn filter(self, mut pred: impl FnMut(&T) -> bool + 'static) -> LazySequence<T> {
        self.stage(move |iter| {
            iter.filter(move |elem| match elem {
                Ok(item) => pred(item),
                Err(_) => true,
            })
        })
    }

    /// 去重，保留首次出现的元素。
    ///
    /// 已出现的元素全部缓存在内存中，对无界数据源内存占用会持续增长。
    pub fn distinct(self) -> LazySequence<T>
    where
        T: Hash + Eq + Clone,
    {
        self.distinct_by(T::clone)
    }

    /// 按照派生的键去重，键相等的元素视为重复。
    pub fn distinct_by<K>(self, mut key: impl FnMut(&T) -> K + 'static) -> LazySequence<T>
    where
        K: Hash + Eq + 'static,
    {
        let mut seen = FxHashSet::default();
        self.filter(move |item| seen.insert(key(item))) // 返回 true 表示保留（首次出现）
    }

    /// 最多保留前`n`个元素，之后不再从上游拉取。
    pub fn limit(self, n: Integer) -> Result<LazySequence<T>, SeqErr> {
        let n = usize::try_from(n).map_err(|_| SeqErr::invalid_arg("limit", "n", n))?;
        Ok(self.stage(move |iter| iter.take(n)))
    }

    /// 丢弃前`n`个元素，错误元素不计数也不会被丢弃。
    pub fn skip(self, n: Integer) -> Result<LazySequence<T>, SeqErr> {
        let mut remaining = usize::try_from(n).map_err(|_| SeqErr::invalid_arg("skip", "n", n))?;
        Ok(self.stage(move |iter| {
            iter.filter(move |elem| {
                if elem.is_ok() && remaining > 0 {
                    remaining -= 1;
                    false
                } else {
                    true
                }
            })
        }))
    }

    /// 保留元素直到条件首次不满足，之后不再从上游拉取。
    pub fn take_while(self, mut pred: impl FnMut(&T) -> bool + 'static) -> LazySequence<T> {
        self.stage(move |iter| {
            iter.take_while(move |elem| match elem {
                Ok(item) => pred(item),
                Err(_) => true,
            })
        })
    }

    /// 丢弃元素直到条件首次不满足。
    pub fn drop_while(self, mut pred: impl FnMut(&T) -> bool + 'static) -> LazySequence<T> {
        self.stage(move |iter| {
            iter.skip_while(move |elem| match elem {
                Ok(item) => pred(item),
                Err(_) => false,
            })
        })
    }

    /* **************************************** 调整位置 **************************************** */

    /// 按照比较函数排序。
    ///
    /// 首次拉取时缓存上游的全部元素后再依次输出，上游无界时永远不会结束。
    /// 上游出现错误时只输出该错误。
    pub fn sorted_by(self, cmp: impl FnMut(&T, &T) -> Ordering + 'static) -> LazySequence<T> {
        self.stage(move |iter| {
            std::iter::once_with(move || itertools::process_results(iter, |items| items.sorted_by(cmp))).flat_map(
                |sorted| match sorted {
                    Ok(items) => Either::Left(items.map(Ok)),
                    Err(err) => Either::Right(std::iter::once(Err(err))),
                },
            )
        })
    }

    /// 按照自然顺序排序。
    pub fn sorted(self) -> LazySequence<T>
    where
        T: Ord,
    {
        self.sorted_by(T::cmp)
    }
}
