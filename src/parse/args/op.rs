use crate::err::SeqErr;
use crate::op::{CaseArg, Op, SortBy, TakeDropMode};
use crate::parse::args::condition::parse_cond;
use crate::parse::args::parse_tag_nocase;
use crate::Integer;
use std::iter::Peekable;

pub(in crate::parse::args) fn parse_ops(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Vec<Op>, SeqErr> {
    let mut ops = vec![];
    while let Some(op) = parse_op(args)? {
        ops.push(op);
    }
    Ok(ops)
}

fn parse_op(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Option<Op>, SeqErr> {
    let Some(op) = args.peek() else {
        return Ok(None);
    };
    let lower_op = op.to_ascii_lowercase();
    let cmd = match lower_op.as_str() {
        ":peek" => ":peek",
        ":upper" => ":upper",
        ":lower" => ":lower",
        ":len" => ":len",
        ":filter" => ":filter",
        ":drop" => ":drop",
        ":take" => ":take",
        ":distinct" => ":distinct",
        ":limit" => ":limit",
        ":skip" => ":skip",
        ":sort" => ":sort",
        _ => return Ok(None),
    };
    args.next(); // 消耗命令
    Ok(Some(match cmd {
        ":peek" => Op::Peek,
        ":upper" => Op::Case(CaseArg::Upper),
        ":lower" => Op::Case(CaseArg::Lower),
        ":len" => Op::Len,
        ":filter" => Op::new_take_drop(TakeDropMode::Filter, parse_cond(args, cmd)?),
        ":drop" => {
            if parse_tag_nocase(args, "while") {
                Op::new_take_drop(TakeDropMode::DropWhile, parse_cond(args, ":drop while")?)
            } else {
                Op::new_take_drop(TakeDropMode::Drop, parse_cond(args, cmd)?)
            }
        }
        ":take" => {
            if parse_tag_nocase(args, "while") {
                Op::new_take_drop(TakeDropMode::TakeWhile, parse_cond(args, ":take while")?)
            } else {
                Err(SeqErr::MissingArg { cmd, arg: "while" })?
            }
        }
        ":distinct" => Op::Distinct(parse_tag_nocase(args, "nocase")),
        ":limit" => Op::Limit(parse_count(args, cmd)?),
        ":skip" => Op::Skip(parse_count(args, cmd)?),
        _ => parse_sort(args),
    }))
}

/// 数量参数在此只校验格式，负数在构造流水线时报错
fn parse_count(args: &mut Peekable<impl Iterator<Item = String>>, cmd: &'static str) -> Result<Integer, SeqErr> {
    let value = args.next().ok_or(SeqErr::MissingArg { cmd, arg: "n" })?;
    value.parse::<Integer>().map_err(|err| SeqErr::ArgParseErr {
        cmd,
        arg: "n",
        arg_value: value.clone(),
        error: err.to_string(),
    })
}

fn parse_sort(args: &mut Peekable<impl Iterator<Item = String>>) -> Op {
    let sort_by = if parse_tag_nocase(args, "num") {
        SortBy::Num
    } else if parse_tag_nocase(args, "nocase") {
        SortBy::Text(true)
    } else if parse_tag_nocase(args, "random") {
        SortBy::Random
    } else {
        SortBy::Text(false)
    };
    let desc = sort_by != SortBy::Random && parse_tag_nocase(args, "desc");
    Op::new_sort(sort_by, desc)
}
