//! 输出解析函数

use super::{CommandOutput, PackageRecord, Source};

/// 去除文本中的 ANSI CSI 转义序列，其余字符原样保留。
///
/// CSI 序列形如 `ESC [ <参数字节 0x30-0x3F>* <中间字节 0x20-0x2F>* <字母>`。
/// 不完整的序列原样保留。删除一个序列可能让前后字符拼成新的序列，
/// 因此重复处理直到结果不再变化，保证幂等。
pub fn strip_ansi(input: &str) -> String {
    let mut current = strip_ansi_once(input);
    loop {
        let next = strip_ansi_once(&current);
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

fn strip_ansi_once(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('\x1b') {
        result.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match csi_len(tail) {
            Some(len) => rest = &tail[len..],
            None => {
                result.push('\x1b');
                rest = &tail[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// 若 `s` 以完整的 CSI 序列开头，返回其字节长度
fn csi_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != 0x1b || bytes[1] != b'[' {
        return None;
    }
    let mut i = 2;
    while i < bytes.len() && (0x30..=0x3f).contains(&bytes[i]) {
        i += 1;
    }
    while i < bytes.len() && (0x20..=0x2f).contains(&bytes[i]) {
        i += 1;
    }
    match bytes.get(i) {
        Some(b) if b.is_ascii_alphabetic() => Some(i + 1),
        _ => None,
    }
}

/// 输出中是否含有该来源的"无结果"提示行
pub fn is_no_match(source: Source, output: &CommandOutput) -> bool {
    match source.no_match_sentinel() {
        Some(sentinel) => output
            .lines()
            .any(|line| strip_ansi(line).trim_start().starts_with(sentinel)),
        None => false,
    }
}

/// 解析搜索输出：每个非空行取第一个空白分隔的词作为包名
pub fn parse_search_output(source: Source, output: &str) -> Vec<PackageRecord> {
    output
        .lines()
        .filter_map(|line| {
            let cleaned = strip_ansi(line);
            cleaned
                .split_whitespace()
                .next()
                .map(|name| PackageRecord::new(name, source))
        })
        .collect()
}
