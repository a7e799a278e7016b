use crate::condition::Select;
use crate::config::Config;
use crate::err::SeqErr;
use crate::input::Input;
use crate::op::Op;
use crate::output::Output;

pub(crate) fn print_version() {
    println!("rseq (rust lazy sequence) - {} - {}", env!("CARGO_PKG_VERSION"), env!("BUILD_TIME"));
}

pub(crate) fn print_help(topic: Option<String>) {
    match topic {
        Some(topic) => {
            print_general_help();
            let topic = topic.to_ascii_lowercase();
            match topic.as_str() {
                "opt" | "options" => print_help_of("<options> 选项：", Config::all_help()),
                "in" | "input" => print_help_of("<input_cmd> 数据输入命令：", Input::all_help()),
                "op" => print_help_of("<op_cmd> 中间操作命令：", Op::all_help()),
                "out" | "output" => print_help_of("<output_cmd> 终止操作命令：", Output::all_help()),
                "cond" | "condition" => print_help_of("条件表达式：", Select::all_help()),
                "code" => print_help_of("命令退出码：", SeqErr::all_help()),
                _ => (),
            }
        }
        None => print_all_help(),
    }
}

fn print_all_help() {
    print_general_help();
    print_help_of("<options> 选项：", Config::all_help());
    print_help_of("<input_cmd> 数据输入命令：", Input::all_help());
    print_help_of("<op_cmd> 中间操作命令：", Op::all_help());
    print_help_of("<output_cmd> 终止操作命令：", Output::all_help());
    print_help_of("条件表达式：", Select::all_help());
    print_help_of("命令退出码：", SeqErr::all_help());
}

fn print_general_help() {
    print_version();
    println!("\n{}", env!("CARGO_PKG_DESCRIPTION"));
    println!("\nUsage: rseq [<options> [<option_value>]] [<input_cmd>] [<op_cmd>[ ...]] [<output_cmd>]");
}

fn print_help_of(title: &str, helps: &[(&str, &str)]) {
    println!("\n{title}");
    for (_, help) in helps {
        println!("{}", help);
    }
}
