use crate::Integer;
use crate::err::SeqErr;
use cmd_help::CmdHelp;
use regex::{Regex, RegexBuilder};

/// 条件
#[derive(Debug, Clone, CmdHelp)]
pub(crate) enum Select {
    /// [not ]len [<min_len>],[<max_len>]
    ///     按照字符数范围选择，最小值和最大值均可省略，支持可选的否定。
    ///     例如：
    ///         len 2,
    ///         len 2,5
    ///         len ,5
    ///         not len 2,5
    TextLenRange { min: Option<usize>, max: Option<usize> },
    /// [not ]len =<len>
    ///     按照特定字符数选择，支持可选的否定。
    ///     例如：
    ///         len =3
    ///         not len =3
    TextLenSpec(usize),
    /// [not ]num [<min>],[<max>]
    ///     按照整数范围选择，最小值和最大值均可省略，支持可选的否定。
    ///     无法解析为整数的数据总是不选择。
    ///     例如：
    ///         num 2,5
    ///         num -2,
    ///         not num ,5
    NumRange { min: Option<Integer>, max: Option<Integer> },
    /// [not ]num =<value>
    ///     按照特定整数选择，支持可选的否定。
    ///     无法解析为整数的数据总是不选择。
    ///     例如：
    ///         num =3
    ///         not num =3
    NumSpec(Integer),
    /// [not ]upper|lower
    ///     选择全部为大写或小写字符的数据，不支持大小写的字符总是满足。
    TextAllCase(bool /*is_upper*/),
    /// [not ]empty|blank
    ///     选择没有任何字符或全部为空白字符的数据。
    TextEmptyOrBlank(bool /*is_empty*/),
    /// [not ]reg <exp>
    ///     选择完整匹配给定正则表达式的数据，全局选项`-n`时忽略大小写。
    ///     例如：
    ///         reg '\d{1,3}(\.\d{1,3}){3}'
    RegMatch(Regex),
}

impl PartialEq for Select {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Select::TextLenRange { min: l_min, max: l_max }, Select::TextLenRange { min: r_min, max: r_max }) => {
                l_min == r_min && l_max == r_max
            }
            (Select::TextLenSpec(l), Select::TextLenSpec(r)) => l == r,
            (Select::NumRange { min: l_min, max: l_max }, Select::NumRange { min: r_min, max: r_max }) => {
                l_min == r_min && l_max == r_max
            }
            (Select::NumSpec(l), Select::NumSpec(r)) => l == r,
            (Select::TextAllCase(l), Select::TextAllCase(r)) => l == r,
            (Select::TextEmptyOrBlank(l), Select::TextEmptyOrBlank(r)) => l == r,
            (Select::RegMatch(l), Select::RegMatch(r)) => l.as_str() == r.as_str(),
            _ => false,
        }
    }
}

impl Select {
    pub(crate) fn new_reg_match(regex: &str) -> Result<Select, SeqErr> {
        build_regex(regex, false).map(Select::RegMatch)
    }

    fn test(&self, input: &str) -> bool {
        match self {
            Select::TextLenRange { min, max } => {
                let len = input.chars().count();
                min.is_none_or(|min| len >= min) && max.is_none_or(|max| len <= max)
            }
            Select::TextLenSpec(len) => input.chars().count() == *len,
            Select::NumRange { min, max } => input
                .parse::<Integer>()
                .is_ok_and(|i| min.is_none_or(|min| i >= min) && max.is_none_or(|max| i <= max)),
            Select::NumSpec(spec) => input.parse::<Integer>().is_ok_and(|i| i == *spec),
            Select::TextAllCase(upper) => {
                if *upper {
                    !input.chars().any(|c| c.is_lowercase())
                } else {
                    !input.chars().any(|c| c.is_uppercase())
                }
            }
            Select::TextEmptyOrBlank(empty) => {
                if *empty {
                    input.is_empty()
                } else {
                    input.chars().all(|c| c.is_whitespace())
                }
            }
            Select::RegMatch(regex) => regex.is_match(input),
        }
    }

    /// 数值条件对无法解析为整数的数据总是不选择，否定也不改变这一点。
    fn is_numeric(&self) -> bool {
        matches!(self, Select::NumRange { .. } | Select::NumSpec(_))
    }
}

/// 可否定的条件
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Condition {
    select: Select,
    not: bool,
}

impl Condition {
    pub(crate) fn new(select: Select, not: bool) -> Condition {
        Condition { select, not }
    }

    pub(crate) fn test(&self, input: &str) -> bool {
        if self.select.is_numeric() && input.parse::<Integer>().is_err() {
            return false;
        }
        self.select.test(input) != self.not
    }

    /// 忽略大小写的版本，仅影响正则条件。
    pub(crate) fn nocase(self) -> Result<Condition, SeqErr> {
        match self.select {
            Select::RegMatch(regex) => {
                let raw =
                    regex.as_str().strip_prefix(r"\A(?:").and_then(|s| s.strip_suffix(r")\z")).unwrap_or_default();
                Ok(Condition { select: Select::RegMatch(build_regex(raw, true)?), not: self.not })
            }
            select => Ok(Condition { select, not: self.not }),
        }
    }
}

fn build_regex(regex: &str, nocase: bool) -> Result<Regex, SeqErr> {
    let reg = format!(r"\A(?:{regex})\z");
    RegexBuilder::new(&reg)
        .case_insensitive(nocase)
        .build()
        .map_err(|err| SeqErr::ParseRegexErr { reg, err: err.to_string() })
}
