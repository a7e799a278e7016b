const BUILD_TIME_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]:[second]";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    // 注入构建时间，`--version`通过env!("BUILD_TIME")读取
    println!("cargo:rustc-env=BUILD_TIME={}", build_time());
}

fn build_time() -> String {
    let Ok(format) = time::format_description::parse(BUILD_TIME_FORMAT) else {
        return "unknown-build-time".to_string();
    };
    // 优先使用本地时间，无法获取时区偏移时回退到UTC
    if let Ok(local) = time::OffsetDateTime::now_local()
        && let Ok(formatted) = local.format(&format)
    {
        return formatted;
    }
    match time::OffsetDateTime::now_utc().format(&format) {
        Ok(formatted) => format!("{formatted} (UTC)"),
        Err(_) => "unknown-build-time".to_string(),
    }
}
