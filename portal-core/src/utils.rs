/// 清理用户输入：去掉 `\`、`"`、`'`、`;`，再截断到最多 `max_len` 字节。
///
/// 截断只发生在字符边界上，不会切开多字节字符。
pub fn sanitize_input(input: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(input.len().min(max_len));
    for c in input.chars().filter(|c| !matches!(c, '\\' | '"' | '\'' | ';')) {
        if out.len() + c.len_utf8() > max_len {
            break;
        }
        out.push(c);
    }
    out
}
