use crate::Integer;
use crate::err::SeqErr;
use crate::seq::{Elem, LazySequence};
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, StdinLock};
use std::path::{Path, PathBuf};

/// 按行读取的外部数据源。
///
/// `open`在序列首次被拉取时才会调用；返回的读取器由流水线持有，
/// 读取结束、读取出错或终止操作返回（包括出错和panic）时被释放。
pub trait LineSource {
    type Reader: BufRead;

    /// 数据源名称，用于错误信息。
    fn name(&self) -> String;

    fn open(self) -> io::Result<Self::Reader>;
}

/// 文件数据源。
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileLines {
    path: PathBuf,
}

impl FileLines {
    pub fn new(path: impl AsRef<Path>) -> FileLines {
        FileLines { path: path.as_ref().to_path_buf() }
    }
}

impl LineSource for FileLines {
    type Reader = BufReader<File>;

    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn open(self) -> io::Result<Self::Reader> {
        File::open(&self.path).map(BufReader::new)
    }
}

/// 标准输入数据源。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StdinLines;

impl LineSource for StdinLines {
    type Reader = StdinLock<'static>;

    fn name(&self) -> String {
        "<stdin>".to_string()
    }

    fn open(self) -> io::Result<Self::Reader> {
        Ok(io::stdin().lock())
    }
}

enum LinesState<S: LineSource> {
    Pending(S),
    Reading { name: String, lines: io::Lines<S::Reader>, line_no: usize },
    Done,
}

/// 延迟打开的按行迭代器，每行至多产出一次。
struct Lines<S: LineSource> {
    state: LinesState<S>,
}

impl<S: LineSource> Iterator for Lines<S> {
    type Item = Elem<String>;

    fn next(&mut self) -> Option<Self::Item> {
        // 未放回的状态随本次调用结束被丢弃，读取器随之释放
        match std::mem::replace(&mut self.state, LinesState::Done) {
            LinesState::Pending(source) => {
                let name = source.name();
                match source.open() {
                    Ok(reader) => {
                        self.state = LinesState::Reading { name, lines: reader.lines(), line_no: 0 };
                        self.next()
                    }
                    Err(err) => Some(Err(SeqErr::OpenInputErr { input: name, err: err.to_string() })),
                }
            }
            LinesState::Reading { name, mut lines, line_no } => match lines.next() {
                Some(Ok(line)) => {
                    self.state = LinesState::Reading { name, lines, line_no: line_no + 1 };
                    Some(Ok(line))
                }
                Some(Err(err)) => {
                    Some(Err(SeqErr::ReadInputErr { input: name, line_no: line_no + 1, err: err.to_string() }))
                }
                None => None,
            },
            LinesState::Done => None,
        }
    }
}

/// 闭区间整数序列，步长为正时从`start`递增，为负时从`end`递减，溢出时结束。
#[derive(Debug, Eq, PartialEq)]
struct RangeIter {
    next: Option<Integer>,
    bound: Integer,
    step: Integer,
}

impl RangeIter {
    fn new(start: Integer, end: Integer, step: Integer) -> RangeIter {
        if start > end {
            RangeIter { next: None, bound: end, step }
        } else if step > 0 {
            RangeIter { next: Some(start), bound: end, step }
        } else {
            RangeIter { next: Some(end), bound: start, step }
        }
    }
}

impl Iterator for RangeIter {
    type Item = Integer;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current
            .checked_add(self.step)
            .filter(|next| if self.step > 0 { *next <= self.bound } else { *next >= self.bound });
        Some(current)
    }
}

impl<T: 'static> LazySequence<T> {
    /// 以内存中的有序值构造序列，也可以是无界的迭代器。
    pub fn from_values<I>(values: I) -> LazySequence<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        LazySequence::new(values.into_iter().map(Ok))
    }

    /// 重复同一个值，`count`为`None`时无限重复。
    pub fn repeat(value: T, count: Option<usize>) -> LazySequence<T>
    where
        T: Clone,
    {
        match count {
            Some(count) => LazySequence::new(std::iter::repeat_n(value, count).map(Ok)),
            None => LazySequence::new(std::iter::repeat(value).map(Ok)),
        }
    }
}

impl LazySequence<String> {
    /// 逐行读取文件，首次拉取时才打开文件。
    pub fn from_lines(path: impl AsRef<Path>) -> LazySequence<String> {
        LazySequence::from_line_source(FileLines::new(path))
    }

    /// 逐行读取标准输入。
    pub fn from_stdin() -> LazySequence<String> {
        LazySequence::from_line_source(StdinLines)
    }

    /// 逐行读取任意数据源，首次拉取时才打开。
    pub fn from_line_source<S>(source: S) -> LazySequence<String>
    where
        S: LineSource + 'static,
        S::Reader: 'static,
    {
        LazySequence::new(Lines { state: LinesState::Pending(source) })
    }
}

impl LazySequence<Integer> {
    /// 闭区间`[start, end]`内的整数，步长为负时逆序生成，步长不能为0。
    pub fn range(start: Integer, end: Integer, step: Integer) -> Result<LazySequence<Integer>, SeqErr> {
        if step == 0 {
            return Err(SeqErr::invalid_arg("range", "step", step));
        }
        Ok(LazySequence::from_values(RangeIter::new(start, end, step)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::record::Record;
    use std::cell::Cell;
    use std::io::{Cursor, Read, Write};
    use std::rc::Rc;

    /// 记录打开和关闭次数的内存数据源。
    pub(crate) struct TrackedSource {
        text: &'static str,
        broken_tail: bool,
        pub(crate) opens: Rc<Cell<usize>>,
        pub(crate) closes: Rc<Cell<usize>>,
    }

    impl TrackedSource {
        pub(crate) fn new(text: &'static str) -> TrackedSource {
            TrackedSource { text, broken_tail: false, opens: Rc::default(), closes: Rc::default() }
        }

        /// 读完`text`之后读取失败。
        pub(crate) fn broken(text: &'static str) -> TrackedSource {
            TrackedSource { broken_tail: true, ..TrackedSource::new(text) }
        }

        pub(crate) fn handle(&self) -> TrackedSource {
            TrackedSource {
                text: self.text,
                broken_tail: self.broken_tail,
                opens: self.opens.clone(),
                closes: self.closes.clone(),
            }
        }
    }

    pub(crate) struct TrackedReader {
        inner: Cursor<&'static [u8]>,
        broken_tail: bool,
        closes: Rc<Cell<usize>>,
    }

    impl Read for TrackedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = {
                let data = self.fill_buf()?;
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                n
            };
            self.consume(n);
            Ok(n)
        }
    }

    impl BufRead for TrackedReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            if self.broken_tail && self.inner.position() as usize >= self.inner.get_ref().len() {
                Err(io::Error::other("device went away"))
            } else {
                self.inner.fill_buf()
            }
        }

        fn consume(&mut self, amt: usize) {
            self.inner.consume(amt)
        }
    }

    impl Drop for TrackedReader {
        fn drop(&mut self) {
            self.closes.set(self.closes.get() + 1);
        }
    }

    impl LineSource for TrackedSource {
        type Reader = TrackedReader;

        fn name(&self) -> String {
            "tracked".to_string()
        }

        fn open(self) -> io::Result<Self::Reader> {
            self.opens.set(self.opens.get() + 1);
            Ok(TrackedReader {
                inner: Cursor::new(self.text.as_bytes()),
                broken_tail: self.broken_tail,
                closes: self.closes.clone(),
            })
        }
    }

    #[test]
    fn test_from_lines_opens_on_first_pull() {
        let source = TrackedSource::new("a\nb\nc\n");
        let mut seq = LazySequence::from_line_source(source.handle()).map(|line| line.to_uppercase());
        assert_eq!(0, source.opens.get());
        assert_eq!(Ok(vec!["A".to_string(), "B".to_string(), "C".to_string()]), seq.to_list());
        assert_eq!(1, source.opens.get());
        assert_eq!(1, source.closes.get());
    }

    #[test]
    fn test_records_released_after_malformed_line() {
        let source = TrackedSource::new("Sean/a\nbroken\nTom/b\n");
        let mut seq = LazySequence::from_line_source(source.handle()).try_map(|line| line.parse::<Record>());
        assert!(matches!(seq.to_list(), Err(SeqErr::MalformedRecord { .. })));
        assert_eq!(1, source.opens.get());
        assert_eq!(1, source.closes.get());
    }

    #[test]
    fn test_from_lines_released_after_limit() {
        let source = TrackedSource::new("a\nb\nc\n");
        let mut seq = LazySequence::from_line_source(source.handle()).limit(1).unwrap();
        assert_eq!(Ok(vec!["a".to_string()]), seq.to_list());
        assert_eq!(1, source.closes.get());
    }

    #[test]
    fn test_from_lines_released_when_consumer_panics() {
        let source = TrackedSource::new("a\nb\nc\n");
        let mut seq = LazySequence::from_line_source(source.handle());
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            seq.for_each(|line| {
                if line == "b" {
                    panic!("consumer failed at {line}");
                }
            })
        }));
        assert!(res.is_err());
        assert_eq!(1, source.opens.get());
        assert_eq!(1, source.closes.get());
        assert!(seq.is_consumed());
    }

    #[test]
    fn test_from_lines_released_when_consumer_fails() {
        let source = TrackedSource::new("a\nb\nc\n");
        let mut seq = LazySequence::from_line_source(source.handle());
        let mut seen = Vec::new();
        let res = seq.try_for_each(|line| {
            if line == "b" {
                return Err(SeqErr::MalformedRecord { line_no: 2, line });
            }
            seen.push(line);
            Ok(())
        });
        assert_eq!(Err(SeqErr::MalformedRecord { line_no: 2, line: "b".to_string() }), res);
        assert_eq!(vec!["a".to_string()], seen);
        assert_eq!(1, source.closes.get());
    }

    #[test]
    fn test_from_lines_read_error() {
        let source = TrackedSource::broken("first\n");
        let mut seq = LazySequence::from_line_source(source.handle());
        let res = seq.to_list();
        let err = res.unwrap_err();
        assert!(err.is_io_failure());
        assert!(matches!(err, SeqErr::ReadInputErr { line_no: 2, .. }));
        assert_eq!(1, source.closes.get());
    }

    #[test]
    fn test_from_lines_never_pulled_never_opened() {
        let source = TrackedSource::new("a\n");
        let seq = LazySequence::from_line_source(source.handle()).filter(|_| true);
        drop(seq);
        assert_eq!(0, source.opens.get());
        assert_eq!(0, source.closes.get());
    }

    #[test]
    fn test_from_lines_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "cat\ndog\n\nsheep").unwrap();
        let mut seq = LazySequence::from_lines(file.path());
        assert_eq!(Ok(vec!["cat", "dog", "", "sheep"].into_iter().map(String::from).collect()), seq.to_list());
    }

    #[test]
    fn test_from_lines_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut seq = LazySequence::from_lines(dir.path().join("missing.txt"));
        let err = seq.count().unwrap_err();
        assert!(err.is_io_failure());
        assert!(matches!(err, SeqErr::OpenInputErr { .. }));
    }

    #[test]
    fn test_repeat() {
        let mut seq = LazySequence::repeat("x", Some(3));
        assert_eq!(Ok(vec!["x", "x", "x"]), seq.to_list());
        let mut seq = LazySequence::repeat(7, None).limit(4).unwrap();
        assert_eq!(Ok(4), seq.count());
        let mut seq = LazySequence::repeat(7, Some(0));
        assert_eq!(Ok(0), seq.count());
    }

    #[test]
    fn test_range_positive() {
        assert_eq!(Ok((0..=10).collect::<Vec<_>>()), LazySequence::range(0, 10, 1).unwrap().to_list());
        assert_eq!(Ok((0..=10).step_by(2).collect::<Vec<_>>()), LazySequence::range(0, 10, 2).unwrap().to_list());
        assert_eq!(Ok(vec![0, 3, 6, 9]), LazySequence::range(0, 10, 3).unwrap().to_list());
    }

    #[test]
    fn test_range_negative() {
        assert_eq!(Ok((0..=10).rev().collect::<Vec<_>>()), LazySequence::range(0, 10, -1).unwrap().to_list());
        assert_eq!(Ok(vec![10, 7, 4, 1]), LazySequence::range(0, 10, -3).unwrap().to_list());
    }

    #[test]
    fn test_range_empty_and_single() {
        assert_eq!(Ok(vec![]), LazySequence::range(10, 0, 1).unwrap().to_list());
        assert_eq!(Ok(vec![]), LazySequence::range(10, 0, -1).unwrap().to_list());
        assert_eq!(Ok(vec![0]), LazySequence::range(0, 0, 5).unwrap().to_list());
    }

    #[test]
    fn test_range_does_not_overflow() {
        assert_eq!(
            Ok(vec![Integer::MAX - 1, Integer::MAX]),
            LazySequence::range(Integer::MAX - 1, Integer::MAX, 1).unwrap().to_list()
        );
        assert_eq!(
            Ok(vec![Integer::MIN + 1, Integer::MIN]),
            LazySequence::range(Integer::MIN, Integer::MIN + 1, -1).unwrap().to_list()
        );
    }

    #[test]
    fn test_range_zero_step() {
        assert!(matches!(LazySequence::range(0, 1, 0).err(), Some(SeqErr::InvalidArgument { op: "range", .. })));
    }
}
