use crate::err::SeqErr;
use crate::input::Input;
use crate::parse::args::{parse_arg, parse_arg1, parse_as, parse_token};
use crate::parse::token::gen_range;
use std::iter::Peekable;

pub(in crate::parse::args) fn parse_input(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Input, SeqErr> {
    let Some(cmd) = args.peek() else {
        return Ok(Input::new_std_in());
    };
    let lower_cmd = cmd.to_ascii_lowercase();
    match lower_cmd.as_str() {
        ":in" => {
            args.next();
            Ok(Input::new_std_in())
        }
        ":file" => {
            args.next();
            Ok(Input::new_file(parse_arg(args, ":file", "file_name")?))
        }
        ":records" => {
            args.next();
            Ok(Input::new_records(parse_arg(args, ":records", "file_name")?))
        }
        ":of" => {
            args.next();
            Ok(Input::new_of(parse_arg1(args, ":of", "text")?))
        }
        ":gen" => {
            args.next();
            let (start, end, step) = parse_token(args, ":gen", "range", gen_range)?;
            Ok(Input::new_gen(start, end, step))
        }
        ":repeat" => {
            args.next();
            let value = parse_arg(args, ":repeat", "value")?;
            Ok(Input::new_repeat(value, parse_as::<usize>(args)))
        }
        _ => Ok(Input::new_std_in()), // 默认从标准输入获取
    }
}
