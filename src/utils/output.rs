//! # 美化输出工具
//!
//! 提供统一的终端输出样式，以及反冲能结果的常用摘要行。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印跳过消息
pub fn print_skip(msg: &str) {
    println!("{} {}", "[SKIP]".dimmed(), msg);
}

/// 打印输出文件
pub fn print_saved(kind: &str, path: &str) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        kind.dimmed(),
        "->".cyan(),
        path
    );
}

/// 打印越界点摘要，`count` 为 0 时不输出
pub fn print_forbidden(count: usize, total: usize) {
    if count == 0 {
        return;
    }
    print_warning(&format!(
        "{} of {} points ({:.1}%) lie beyond the kinematic limit and are left blank",
        count,
        total,
        forbidden_percent(count, total)
    ));
}

/// 打印有限反冲能的范围
pub fn print_recoil_range(range: Option<(f64, f64)>) {
    match range {
        Some((lo, hi)) => print_info(&format!("Recoil range: {:.4} - {:.4} keVnr", lo, hi)),
        None => print_warning("No finite recoil energies: every point is kinematically forbidden"),
    }
}

fn forbidden_percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
