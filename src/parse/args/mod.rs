use crate::err::SeqErr;
use crate::input::Input;
use crate::op::Op;
use crate::output::Output;
use crate::parse::args::input::parse_input;
use crate::parse::args::op::parse_ops;
use crate::parse::args::output::parse_output;
use crate::parse::token::ParserError;
use nom::IResult;
use std::iter::Peekable;
use std::str::FromStr;

mod condition;
mod config;
mod input;
mod op;
mod output;

pub(crate) use config::parse_configs;

pub(crate) fn parse(mut args: Peekable<impl Iterator<Item = String>>) -> Result<(Input, Vec<Op>, Output), SeqErr> {
    let input = parse_input(&mut args)?;
    let ops = parse_ops(&mut args)?;
    let output = parse_output(&mut args)?;
    let remaining = args.collect::<Vec<_>>();
    if !remaining.is_empty() { Err(SeqErr::UnknownArgs { args: remaining }) } else { Ok((input, ops, output)) }
}

/// 解析一个或多个参数，参数不为命令格式，处理转义
fn parse_arg1(
    args: &mut Peekable<impl Iterator<Item = String>>, cmd: &'static str, arg: &'static str,
) -> Result<Vec<String>, SeqErr> {
    let res = parse_arg0(args);
    if res.is_empty() { Err(SeqErr::MissingArg { cmd, arg }) } else { Ok(res) }
}

/// 解析零个或多个参数，参数不为命令格式，处理转义
fn parse_arg0(args: &mut Peekable<impl Iterator<Item = String>>) -> Vec<String> {
    let mut res = Vec::new();
    while let Some(arg) = parse_opt_arg(args) {
        res.push(arg);
    }
    res
}

/// 解析一个可选的参数，参数不为命令格式，处理转义
fn parse_opt_arg(args: &mut Peekable<impl Iterator<Item = String>>) -> Option<String> {
    if let Some(value) = args.peek()
        && !is_cmd(value)
    {
        args.next().map(escape)
    } else {
        None
    }
}

/// 解析一个必选参数，参数不为命令格式，处理转义
fn parse_arg(
    args: &mut Peekable<impl Iterator<Item = String>>, cmd: &'static str, arg: &'static str,
) -> Result<String, SeqErr> {
    parse_opt_arg(args).ok_or(SeqErr::MissingArg { cmd, arg })
}

/// 以`:`开头的参数为命令，`::`开头的为转义后的普通参数
fn is_cmd(value: &str) -> bool {
    value.starts_with(':') && !value.starts_with("::")
}

fn escape(arg: String) -> String {
    if let Some(stripped) = arg.strip_prefix("::") { format!(":{}", stripped) } else { arg }
}

fn parse_tag_nocase(args: &mut Peekable<impl Iterator<Item = String>>, tag: &'static str) -> bool {
    if let Some(value) = args.peek()
        && value.eq_ignore_ascii_case(tag)
    {
        args.next();
        true
    } else {
        false
    }
}

fn parse_as<T: FromStr>(args: &mut Peekable<impl Iterator<Item = String>>) -> Option<T> {
    if let Some(value) = args.peek() {
        let option = value.parse::<T>().ok();
        if option.is_some() {
            args.next();
        }
        option
    } else {
        None
    }
}

/// 以`parser`完整解析一个必选参数的值
fn parse_token<T>(
    args: &mut Peekable<impl Iterator<Item = String>>, cmd: &'static str, arg: &'static str,
    parser: impl FnOnce(&str) -> IResult<&str, T, ParserError<'_>>,
) -> Result<T, SeqErr> {
    let value = args.next().ok_or(SeqErr::MissingArg { cmd, arg })?;
    match parser(&value) {
        Ok((remaining, res)) => {
            if remaining.is_empty() {
                Ok(res)
            } else {
                Err(SeqErr::UnexpectedRemaining { cmd, arg, remaining: remaining.to_string() })
            }
        }
        Err(err) => Err(SeqErr::ArgParseErr { cmd, arg, error: err.to_string(), arg_value: value }),
    }
}

#[cfg(test)]
fn build_args(args_line: &'static str) -> Peekable<impl Iterator<Item = String>> {
    args_line.split_whitespace().map(String::from).peekable()
}
