//! 用于定位正文区域的简单选择器。
//!
//! 只支持由标签名、`.class` 和 `#id` 组成的复合选择器，例如 `.md-content`、
//! `article#main`、`div.md-content.md-typeset`，以及通配的 `*`。
//! 组合符、属性选择器和伪类都不支持。

use std::{fmt, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{CleanError, Element};

lazy_static! {
    static ref COMPOUND_SELECTOR: Regex = Regex::new(
        r"^(?:\*|[A-Za-z][A-Za-z0-9-]*)?(?:[.#]-?[A-Za-z_][A-Za-z0-9_-]*)*$"
    )
    .expect("选择器正则必须有效");
    static ref SELECTOR_PART: Regex =
        Regex::new(r"([.#]?)(\*|-?[A-Za-z_][A-Za-z0-9_-]*)").expect("选择器片段正则必须有效");
}

/// 解析后的复合选择器。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    /// 解析选择器字符串。
    ///
    /// # 错误
    ///
    /// 空字符串、包含组合符或其它不支持的语法、或者出现多个 `#id` 时返回
    /// [`CleanError::InvalidSelector`]。
    pub fn parse(input: &str) -> Result<Self, CleanError> {
        let input = input.trim();
        if input.is_empty() || !COMPOUND_SELECTOR.is_match(input) {
            return Err(CleanError::InvalidSelector(input.to_string()));
        }

        let mut selector = Self::default();
        for caps in SELECTOR_PART.captures_iter(input) {
            let name = &caps[2];
            match &caps[1] {
                "." => selector.classes.push(name.to_string()),
                "#" => {
                    if selector.id.is_some() {
                        return Err(CleanError::InvalidSelector(input.to_string()));
                    }
                    selector.id = Some(name.to_string());
                }
                // 通配符不限制标签名
                _ if name == "*" => {}
                _ => selector.tag = Some(name.to_ascii_lowercase()),
            }
        }

        Ok(selector)
    }

    /// 判断元素是否匹配该选择器。
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag
            && !element.tag.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && element.id.as_deref() != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|class| element.has_class(class))
    }
}

impl FromStr for Selector {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => f.write_str(tag)?,
            None if self.id.is_none() && self.classes.is_empty() => f.write_str("*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}
