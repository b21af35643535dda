//! 包含一些工具函数的模块。

use lazy_static::lazy_static;
use regex::Regex;

/// 中文字符集合：汉字、CJK 符号和标点、全角/半角形式，
/// 竖排标点中的 U+FE10 和 U+FE1F，以及中文排版中常见的连接号、弯引号、省略号和间隔号。
const CHINESE_CHAR_CLASS: &str =
    "[\\p{Han}\u{3000}-\u{303F}\u{FE10}\u{2013}\u{FE1F}\u{FF00}-\u{FFEF}“”‘’…•·]";

lazy_static! {
    static ref CHINESE_CHAR: Regex =
        Regex::new(&format!("^{CHINESE_CHAR_CLASS}$")).expect("中文字符集正则必须有效");
}

/// 判断一个字符是否属于中文字符集合。
pub fn is_chinese_char(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    let mut buf = [0u8; 4];
    CHINESE_CHAR.is_match(c.encode_utf8(&mut buf))
}
