use crate::condition::{Condition, Select};
use crate::err::SeqErr;
use crate::parse::args::{parse_tag_nocase, parse_token};
use crate::parse::token::{cond_range, cond_spec, parse_integer};
use nom::Parser;
use nom::branch::alt;
use nom::character::complete::usize;
use nom::combinator::map;
use std::iter::Peekable;

/// 解析`[not ]<select>`形式的条件
pub(in crate::parse::args) fn parse_cond(
    args: &mut Peekable<impl Iterator<Item = String>>, cmd: &'static str,
) -> Result<Condition, SeqErr> {
    let not = parse_tag_nocase(args, "not");
    let Some(select) = args.next() else {
        return Err(SeqErr::MissingArg { cmd, arg: "condition" });
    };
    let select = match select.to_ascii_lowercase().as_str() {
        "len" => parse_token(args, cmd, "len range or spec", |s| {
            alt((
                map(cond_range(usize), |(min, max)| Select::TextLenRange { min, max }),
                map(cond_spec(usize), Select::TextLenSpec),
            ))
            .parse(s)
        })?,
        "num" => parse_token(args, cmd, "num range or spec", |s| {
            alt((
                map(cond_range(parse_integer), |(min, max)| Select::NumRange { min, max }),
                map(cond_spec(parse_integer), Select::NumSpec),
            ))
            .parse(s)
        })?,
        "reg" => {
            let regex = args.next().ok_or(SeqErr::MissingArg { cmd, arg: "reg regex" })?;
            Select::new_reg_match(&regex)?
        }
        "upper" => Select::TextAllCase(true),
        "lower" => Select::TextAllCase(false),
        "empty" => Select::TextEmptyOrBlank(true),
        "blank" => Select::TextEmptyOrBlank(false),
        _ => {
            return Err(SeqErr::ArgParseErr {
                cmd,
                arg: "condition",
                arg_value: select,
                error: "unknown condition".to_string(),
            });
        }
    };
    Ok(Condition::new(select, not))
}
