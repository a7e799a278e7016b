//! 终止操作：驱动整条流水线求值并消费序列。
//!
//! 所有终止操作在遇到第一个`Err`元素时立即返回该错误；
//! 取出的迭代器在返回时（包括提前返回和panic）被丢弃，数据源随之释放。

use crate::err::SeqErr;
use crate::seq::LazySequence;
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Display};
use std::hash::Hash;

impl<T: 'static> LazySequence<T> {
    /// 按顺序对每个元素执行`f`。
    pub fn for_each(&mut self, mut f: impl FnMut(T)) -> Result<(), SeqErr> {
        for elem in self.drain()? {
            f(elem?);
        }
        Ok(())
    }

    /// 按顺序对每个元素执行可失败的`f`，返回第一个错误。
    pub fn try_for_each(&mut self, mut f: impl FnMut(T) -> Result<(), SeqErr>) -> Result<(), SeqErr> {
        self.drain()?.try_for_each(|elem| f(elem?))
    }

    /// 经过所有中间操作后剩余的元素数量。
    pub fn count(&mut self) -> Result<usize, SeqErr> {
        self.drain()?.try_fold(0, |count, elem| elem.map(|_| count + 1))
    }

    /// 从`identity`开始左折叠，空序列返回`identity`。
    pub fn reduce(&mut self, identity: T, mut accumulator: impl FnMut(T, T) -> T) -> Result<T, SeqErr> {
        self.drain()?.try_fold(identity, |acc, elem| Ok(accumulator(acc, elem?)))
    }

    /// 折叠为另一种类型的结果。
    ///
    /// `combiner`用于合并分区的部分结果，顺序执行时不会被调用。
    pub fn reduce_with<U>(
        &mut self, identity: U, mut accumulator: impl FnMut(U, T) -> U, _combiner: impl FnMut(U, U) -> U,
    ) -> Result<U, SeqErr> {
        self.drain()?.try_fold(identity, |acc, elem| Ok(accumulator(acc, elem?)))
    }

    /// 收集到由`supplier`创建的可变容器中。
    ///
    /// `combiner`用于合并分区的容器，顺序执行时不会被调用。
    pub fn collect<C>(
        &mut self, supplier: impl FnOnce() -> C, mut accumulator: impl FnMut(&mut C, T),
        _combiner: impl FnMut(&mut C, C),
    ) -> Result<C, SeqErr> {
        let mut container = supplier();
        for elem in self.drain()? {
            accumulator(&mut container, elem?);
        }
        Ok(container)
    }

    pub fn to_list(&mut self) -> Result<Vec<T>, SeqErr> {
        self.drain()?.collect()
    }

    pub fn to_set(&mut self) -> Result<HashSet<T>, SeqErr>
    where
        T: Hash + Eq,
    {
        self.drain()?.collect()
    }

    /// 收集为映射，出现重复的键时返回[`SeqErr::DuplicateKey`]。
    pub fn to_map<K, V>(
        &mut self, mut key_fn: impl FnMut(&T) -> K, mut value_fn: impl FnMut(T) -> V,
    ) -> Result<HashMap<K, V>, SeqErr>
    where
        K: Hash + Eq + Debug,
        V: Debug,
    {
        let mut map = HashMap::new();
        for elem in self.drain()? {
            let item = elem?;
            let key = key_fn(&item);
            let value = value_fn(item);
            match map.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(SeqErr::DuplicateKey {
                        key: format!("{:?}", entry.key()),
                        existing: format!("{:?}", entry.get()),
                        incoming: format!("{value:?}"),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
            }
        }
        Ok(map)
    }

    /// 收集为映射，重复键的值按出现顺序用`merge_fn(已有值, 新值)`合并。
    pub fn to_map_merge<K, V>(
        &mut self, mut key_fn: impl FnMut(&T) -> K, mut value_fn: impl FnMut(T) -> V,
        mut merge_fn: impl FnMut(V, V) -> V,
    ) -> Result<HashMap<K, V>, SeqErr>
    where
        K: Hash + Eq,
    {
        let mut map = HashMap::new();
        for elem in self.drain()? {
            let item = elem?;
            let key = key_fn(&item);
            let value = value_fn(item);
            let value = match map.remove(&key) {
                Some(existing) => merge_fn(existing, value),
                None => value,
            };
            map.insert(key, value);
        }
        Ok(map)
    }

    /// 按键分组，组内保持出现顺序。
    pub fn group_by<K>(&mut self, key_fn: impl FnMut(&T) -> K) -> Result<HashMap<K, Vec<T>>, SeqErr>
    where
        K: Hash + Eq,
    {
        self.group_by_into(key_fn)
    }

    /// 按键分组到任意的下游容器，例如`BTreeSet`。
    pub fn group_by_into<K, C>(&mut self, mut key_fn: impl FnMut(&T) -> K) -> Result<HashMap<K, C>, SeqErr>
    where
        K: Hash + Eq,
        C: Default + Extend<T>,
    {
        let mut groups: HashMap<K, C> = HashMap::new();
        for elem in self.drain()? {
            let item = elem?;
            groups.entry(key_fn(&item)).or_default().extend(std::iter::once(item));
        }
        Ok(groups)
    }

    /// 按条件分为两组：`(不满足条件的元素, 满足条件的元素)`。
    pub fn partition_by(&mut self, mut pred: impl FnMut(&T) -> bool) -> Result<(Vec<T>, Vec<T>), SeqErr> {
        let (mut rejected, mut accepted) = (Vec::new(), Vec::new());
        for elem in self.drain()? {
            let item = elem?;
            if pred(&item) {
                accepted.push(item);
            } else {
                rejected.push(item);
            }
        }
        Ok((rejected, accepted))
    }

    /// 以`delimiter`连接所有元素的文本。
    pub fn joining(&mut self, delimiter: &str) -> Result<String, SeqErr>
    where
        T: Display,
    {
        itertools::process_results(self.drain()?, |mut items| items.join(delimiter))
    }

    /// 元素映射为数值后的平均值，空序列返回0。
    pub fn average(&mut self, mut f: impl FnMut(&T) -> f64) -> Result<f64, SeqErr> {
        let (sum, count) = self.drain()?.try_fold((0.0, 0usize), |(sum, count), elem| {
            elem.map(|item| (sum + f(&item), count + 1))
        })?;
        Ok(if count == 0 { 0.0 } else { sum / count as f64 })
    }

    pub fn min_by(&mut self, cmp: impl FnMut(&T, &T) -> Ordering) -> Result<Option<T>, SeqErr> {
        itertools::process_results(self.drain()?, |items| items.min_by(cmp))
    }

    pub fn max_by(&mut self, cmp: impl FnMut(&T, &T) -> Ordering) -> Result<Option<T>, SeqErr> {
        itertools::process_results(self.drain()?, |items| items.max_by(cmp))
    }

    /// 第一个元素，只从上游拉取一次。
    pub fn find_first(&mut self) -> Result<Option<T>, SeqErr> {
        self.drain()?.next().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::tests::counted_naturals;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeSet;
    use std::rc::Rc;

    fn strings(values: &[&str]) -> LazySequence<String> {
        LazySequence::from_values(values.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_reduce() {
        assert_eq!(Ok(6), LazySequence::from_values(vec![1, 2, 3]).reduce(0, |a, b| a + b));
        assert_eq!(Ok(0), LazySequence::from_values(Vec::<i32>::new()).reduce(0, |a, b| a + b));
        assert_eq!(Ok(24), LazySequence::from_values(vec![2, 3, 4]).reduce(1, |a, b| a * b));
        assert_eq!(Ok("sean".to_string()), strings(&["s", "e", "a", "n"]).reduce(String::new(), |s, c| s + &c));
    }

    #[test]
    fn test_reduce_with_never_combines_sequentially() {
        let combined = Cell::new(false);
        let length = strings(&["car", "bus", "train", "aeroplane"]).reduce_with(
            0,
            |n, s| n + s.len(),
            |a, b| {
                combined.set(true);
                a + b
            },
        );
        assert_eq!(Ok(20), length);
        assert!(!combined.get());
    }

    #[test]
    fn test_collect() {
        let word = strings(&["ad", "jud", "i", "cate"]).collect(String::new, |sb, s| sb.push_str(&s), |a, b| {
            a.push_str(&b)
        });
        assert_eq!(Ok("adjudicate".to_string()), word);
    }

    #[test]
    fn test_second_terminal_fails_without_side_effects() {
        let peeked = Rc::new(Cell::new(0));
        let counter = peeked.clone();
        let mut seq =
            LazySequence::from_values(vec!["cat", "dog", "sheep"]).peek(move |_| counter.set(counter.get() + 1));
        assert_eq!(Ok(3), seq.count());
        assert_eq!(3, peeked.get());
        assert_eq!(Err(SeqErr::AlreadyConsumed), seq.count());
        assert_eq!(Err(SeqErr::AlreadyConsumed), seq.to_list());
        assert_eq!(Err(SeqErr::AlreadyConsumed), seq.for_each(|_| ()));
        assert_eq!(3, peeked.get());
    }

    #[test]
    fn test_to_map() {
        let map = strings(&["cake", "biscuit", "apple tart"]).to_map(|s| s.clone(), |s| s.len());
        assert_eq!(
            Ok(HashMap::from([("cake".to_string(), 4), ("biscuit".to_string(), 7), ("apple tart".to_string(), 10)])),
            map
        );
    }

    #[test]
    fn test_to_map_duplicate_key() {
        let res = strings(&["cake", "biscuits", "tart"]).to_map(|s| s.len(), |s| s);
        assert_eq!(
            Err(SeqErr::DuplicateKey {
                key: "4".to_string(),
                existing: "\"cake\"".to_string(),
                incoming: "\"tart\"".to_string()
            }),
            res
        );
    }

    #[test]
    fn test_to_map_merge() {
        let map = strings(&["cake", "biscuits", "tart", "apple tart", "flan"]).to_map_merge(
            |s| s.len(),
            |s| s,
            |a, b| a + "," + &b,
        );
        assert_eq!(
            Ok(HashMap::from([
                (4, "cake,tart,flan".to_string()),
                (8, "biscuits".to_string()),
                (10, "apple tart".to_string())
            ])),
            map
        );
    }

    #[test]
    fn test_group_by() {
        let groups = strings(&["Joe", "Tom", "Tom", "Alan", "Peter"]).group_by(|s| s.len());
        assert_eq!(
            Ok(HashMap::from([
                (3, vec!["Joe".to_string(), "Tom".to_string(), "Tom".to_string()]),
                (4, vec!["Alan".to_string()]),
                (5, vec!["Peter".to_string()])
            ])),
            groups
        );
    }

    #[test]
    fn test_group_by_into_set() {
        let groups: HashMap<usize, BTreeSet<String>> =
            strings(&["Joe", "Tom", "Tom", "Alan", "Peter"]).group_by_into(|s| s.len()).unwrap();
        assert_eq!(BTreeSet::from(["Joe".to_string(), "Tom".to_string()]), groups[&3]);
        assert_eq!(3, groups.len());
    }

    #[test]
    fn test_partition_by() {
        let names = ["Thomas", "Teresa", "Mike", "Alan", "Peter"];
        let (rejected, accepted) = strings(&names).partition_by(|s| s.starts_with('T')).unwrap();
        assert_eq!(vec!["Mike", "Alan", "Peter"], rejected);
        assert_eq!(vec!["Thomas", "Teresa"], accepted);

        let (rejected, accepted) = strings(&names).partition_by(|s| s.len() > 4).unwrap();
        assert_eq!(vec!["Mike", "Alan"], rejected);
        assert_eq!(vec!["Thomas", "Teresa", "Peter"], accepted);
    }

    #[test]
    fn test_joining_and_average() {
        let desserts = ["cake", "biscuits", "apple tart"];
        assert_eq!(Ok("cake, biscuits, apple tart".to_string()), strings(&desserts).joining(", "));
        let avg = strings(&desserts).average(|s| s.len() as f64).unwrap();
        assert!((avg - 22.0 / 3.0).abs() < 1e-9);
        assert_eq!(Ok(0.0), strings(&[]).average(|s| s.len() as f64));
        assert_eq!(Ok(String::new()), strings(&[]).joining(", "));
    }

    #[test]
    fn test_min_max() {
        assert_eq!(Ok(Some(30)), LazySequence::from_values(vec![10, 20, 30]).max_by(|a, b| a.cmp(b)));
        assert_eq!(
            Ok(Some(10.0)),
            LazySequence::from_values(vec![10.0, 20.0, 30.0]).min_by(|a: &f64, b| a.total_cmp(b))
        );
        assert_eq!(Ok(None), LazySequence::from_values(Vec::<i32>::new()).max_by(|a, b| a.cmp(b)));
    }

    #[test]
    fn test_find_first_short_circuits() {
        let pulls = Rc::new(Cell::new(0));
        let mut seq = counted_naturals(pulls.clone()).filter(|n| n % 5 == 4);
        assert_eq!(Ok(Some(4)), seq.find_first());
        assert_eq!(5, pulls.get());
    }

    #[test]
    fn test_terminal_stops_at_first_error() {
        let seen = RefCell::new(Vec::new());
        let bad = SeqErr::ReadInputErr { input: "x".to_string(), line_no: 2, err: "gone".to_string() };
        let mut seq = LazySequence::new(vec![Ok(1), Err(bad.clone()), Ok(3)].into_iter());
        assert_eq!(Err(bad), seq.for_each(|n| seen.borrow_mut().push(n)));
        assert_eq!(vec![1], *seen.borrow());
    }

    #[test]
    fn test_to_set() {
        let set = strings(&["a", "b", "a"]).to_set().unwrap();
        assert_eq!(HashSet::from(["a".to_string(), "b".to_string()]), set);
    }
}
