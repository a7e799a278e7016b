//! 参数内部的表达式解析：整数范围与条件的范围、特定值。

use crate::Integer;
use nom::character::complete::char;
use nom::combinator::{map, opt, verify};
use nom::error::context;
use nom::sequence::preceded;
use nom::{IResult, Parser};
use nom_language::error::VerboseError;

/// 解析错误的类型
pub(crate) type ParserError<'a> = VerboseError<&'a str>;

/// 重新导出解析整数的函数
pub(crate) use nom::character::complete::i64 as parse_integer;

/// 解析`<start>[,[<end>][,<step>]]`，未指定的结束值为整数最大值，未指定的步长为1，步长不能为0。
pub(crate) fn gen_range(input: &str) -> IResult<&str, (Integer, Integer, Integer), ParserError<'_>> {
    map(
        (
            context("<start>", parse_integer), // 必选起始值
            opt(preceded(
                char(','), // 结束值分隔符
                (
                    opt(context("<end>", parse_integer)),                                      // 可选结束值
                    opt(preceded(char(','), verify(context("<step>", parse_integer), |s| *s != 0))), // 可选步长
                ),
            )),
        ),
        |(start, end_and_step)| match end_and_step {
            Some((end, step)) => (start, end.unwrap_or(Integer::MAX), step.unwrap_or(1)),
            None => (start, Integer::MAX, 1),
        },
    )
    .parse(input)
}

/// 构造范围解析器：`[<min>],[<max>]`，最小值和最大值均可省略。
pub(crate) fn cond_range<'a, T, F>(
    bound: F,
) -> impl Parser<&'a str, Output = (Option<T>, Option<T>), Error = ParserError<'a>>
where
    F: Parser<&'a str, Output = T, Error = ParserError<'a>> + Clone,
{
    map(
        (context("[<min>]", opt(bound.clone())), char(','), context("[<max>]", opt(bound))),
        |(min, _, max)| (min, max),
    )
}

/// 构造特定值解析器：`=<spec>`。
pub(crate) fn cond_spec<'a, T, F>(spec: F) -> impl Parser<&'a str, Output = T, Error = ParserError<'a>>
where
    F: Parser<&'a str, Output = T, Error = ParserError<'a>>,
{
    preceded(char('='), context("<spec>", spec))
}
