//! 终端彩色输出，仅在输出流为终端时着色。

#[macro_export]
macro_rules! println_err {
    () => {};
    ($($arg:tt)*) => {
        if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            eprint!("\x1b[1;31m");
            eprint!($($arg)*);
            eprintln!("\x1b[0m");
        } else {
            eprintln!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! println_info {
    () => {};
    ($($arg:tt)*) => {
        if std::io::IsTerminal::is_terminal(&std::io::stdout()) {
            print!("\x1b[1;34m");
            print!($($arg)*);
            println!("\x1b[0m");
        } else {
            println!($($arg)*);
        }
    };
}

/// 用于`:peek`等旁路输出，与最终结果区分。
#[macro_export]
macro_rules! println_notice {
    () => {};
    ($($arg:tt)*) => {
        if std::io::IsTerminal::is_terminal(&std::io::stdout()) {
            print!("\x1b[35m");
            print!($($arg)*);
            println!("\x1b[0m");
        } else {
            println!($($arg)*);
        }
    };
}
