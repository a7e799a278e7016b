use crate::err::SeqErr;
use crate::output::Output;
use crate::parse::args::condition::parse_cond;
use crate::parse::args::{parse_opt_arg, parse_tag_nocase};
use std::iter::Peekable;

pub(in crate::parse::args) fn parse_output(
    args: &mut Peekable<impl Iterator<Item = String>>,
) -> Result<Output, SeqErr> {
    let Some(cmd) = args.peek() else {
        return Ok(Output::new_std_out());
    };
    let lower_cmd = cmd.to_ascii_lowercase();
    match lower_cmd.as_str() {
        ":to" => {
            args.next(); // 消耗`:to`
            if parse_tag_nocase(args, "out") {
                Ok(Output::new_std_out())
            } else {
                Err(SeqErr::MissingArg { cmd: ":to", arg: "out" })
            }
        }
        ":count" => {
            args.next();
            Ok(Output::Count)
        }
        ":join" => {
            args.next();
            Ok(Output::Join(parse_opt_arg(args).unwrap_or_else(|| ", ".to_string())))
        }
        ":group" => {
            args.next();
            if parse_tag_nocase(args, "len") {
                Ok(Output::GroupLen)
            } else {
                Err(SeqErr::MissingArg { cmd: ":group", arg: "len" })
            }
        }
        ":partition" => {
            args.next();
            Ok(Output::Partition(parse_cond(args, ":partition")?))
        }
        _ => Ok(Output::new_std_out()),
    }
}
