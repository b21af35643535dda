//! # 中文空格清理
//!
//! Markdown 转 HTML 时，中英文混排的段落里常常会留下多余的空白。该模块删除：
//!
//! 1. 两侧都是中文字符（或中文标点）的空白；
//! 2. 每个文本节点开头和结尾的空白。
//!
//! 清理以文本节点为单位进行。一个节点末尾的中文字符与下一个节点开头的中文字符
//! 之间的空白不会被合并，只有节点自身字符串里的空白才会被处理。
//!
//! 删除规则等价于浏览器中带 `gu` 标志的
//! `(?<=中文)\s+(?=中文)|^\s+|\s+$` 全局替换，但按空白段线性扫描，
//! 不存在回溯，任意长度的文本都不会失败。

use std::{borrow::Cow, ops::Range};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::types::Node;
use crate::utils::is_chinese_char;

lazy_static! {
    /// 一段连续空白。字符集合与浏览器正则中的 `\s` 一致（包括 U+FEFF，不包括 U+0085）。
    static ref WHITESPACE_RUN: Regex = Regex::new(
        r"[\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+"
    )
    .expect("空白正则必须有效");

    static ref BLANK_LINES: Regex = Regex::new(r"\n{3,}").expect("空行正则必须有效");
}

/// 删除 `text` 中的若干字节区间，区间必须递增且互不重叠。
///
/// 没有任何区间时直接借用原字符串。
fn delete_ranges(text: &str, ranges: impl IntoIterator<Item = Range<usize>>) -> Cow<'_, str> {
    let mut output: Option<String> = None;
    let mut last_end = 0;

    for range in ranges {
        let buffer = output.get_or_insert_with(|| String::with_capacity(text.len()));
        buffer.push_str(&text[last_end..range.start]);
        last_end = range.end;
    }

    match output {
        Some(mut buffer) => {
            buffer.push_str(&text[last_end..]);
            Cow::Owned(buffer)
        }
        None => Cow::Borrowed(text),
    }
}

/// 计算一段连续空白中需要删除的区间（相对 `run` 的字节偏移）。
///
/// `before`/`after` 是空白段前后紧邻的字符。U+3000 既是空白也是中文标点，
/// 所以空白段内部的 U+3000 也可以作为两侧的判断字符，删除的可能只是段内的一部分。
fn removable_spans(
    run: &str,
    before: Option<char>,
    after: Option<char>,
    at_start: bool,
    at_end: bool,
) -> Vec<Range<usize>> {
    let chars: Vec<(usize, char)> = run.char_indices().collect();
    let len = chars.len();
    let byte_at = |i: usize| chars.get(i).map_or(run.len(), |&(offset, _)| offset);
    let is_anchor = |i: usize| match chars.get(i) {
        Some(&(_, c)) => is_chinese_char(c),
        None => after.is_some_and(is_chinese_char),
    };

    // 贪婪匹配回退时找到的最远右侧中文字符，与起点无关
    let last_anchor = (1..=len).rev().find(|&i| is_anchor(i));

    let mut spans = Vec::new();
    let mut pos = 0;
    while pos < len {
        let behind = if pos == 0 { before } else { Some(chars[pos - 1].1) };
        let flanked = last_anchor.filter(|&end| behind.is_some_and(is_chinese_char) && end > pos);
        let boundary = ((pos == 0 && at_start) || at_end).then_some(len);

        match flanked.or(boundary) {
            Some(end) => {
                spans.push(byte_at(pos)..byte_at(end));
                pos = end;
            }
            None => pos += 1,
        }
    }
    spans
}

/// 删除一段文本中两侧都是中文字符的空白，以及首尾空白。
///
/// 没有任何删除时借用原字符串。
pub fn remove_chinese_spaces(text: &str) -> Cow<'_, str> {
    let ranges = WHITESPACE_RUN.find_iter(text).flat_map(|run| {
        let before = text[..run.start()].chars().next_back();
        let after = text[run.end()..].chars().next();
        removable_spans(
            run.as_str(),
            before,
            after,
            run.start() == 0,
            run.end() == text.len(),
        )
        .into_iter()
        .map(move |span| run.start() + span.start..run.start() + span.end)
    });
    delete_ranges(text, ranges)
}

/// 就地清理 `root` 之下所有文本节点的空格。
///
/// 按文档顺序深度优先遍历：文本节点整体替换后写回，元素节点递归处理其子节点，
/// 注释节点保持不变。不会增加或删除任何节点。
///
/// 返回内容发生变化的文本节点数量。
pub fn clean_chinese_spaces(root: &mut Node) -> usize {
    let mut changed = 0;
    clean_text_nodes(root, &mut changed);
    debug!(changed, "中文空格清理完成");
    changed
}

fn clean_text_nodes(node: &mut Node, changed: &mut usize) {
    match node {
        Node::Text { value } => {
            let cleaned = match remove_chinese_spaces(value) {
                Cow::Borrowed(_) => None,
                Cow::Owned(cleaned) => Some(cleaned),
            };
            if let Some(cleaned) = cleaned {
                *value = cleaned;
                *changed += 1;
            }
        }
        Node::Element(element) => {
            for child in &mut element.children {
                clean_text_nodes(child, changed);
            }
        }
        Node::Comment { .. } => {}
    }
}

/// 合并被硬换行拆开的中文段落，用于导出页面纯文本。
///
/// 删除两侧都是中文字符的单个换行，把三个及以上的连续换行压缩为一个空行，
/// 并去掉首尾换行。没有任何改动时借用原字符串。
pub fn join_wrapped_lines(text: &str) -> Cow<'_, str> {
    let breaks = text.match_indices('\n').filter_map(|(index, _)| {
        let before = text[..index].chars().next_back();
        let after = text[index + 1..].chars().next();
        (before.is_some_and(is_chinese_char) && after.is_some_and(is_chinese_char))
            .then_some(index..index + 1)
    });

    let collapsed = match delete_ranges(text, breaks) {
        Cow::Borrowed(joined) => BLANK_LINES.replace_all(joined, "\n\n"),
        Cow::Owned(joined) => Cow::Owned(BLANK_LINES.replace_all(&joined, "\n\n").into_owned()),
    };

    match collapsed {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim_matches('\n')),
        Cow::Owned(s) => Cow::Owned(s.trim_matches('\n').to_string()),
    }
}
