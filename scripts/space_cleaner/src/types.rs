//! 定义了页面空格清理中使用的核心数据类型。

use std::{collections::HashMap, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=============================================================================
// 1. 错误枚举
//=============================================================================

/// 定义空格清理过程中可能发生的各种错误。
#[derive(Error, Debug)]
pub enum CleanError {
    /// 无法解析的内容区域选择器。
    #[error("无效的选择器: {0}")]
    InvalidSelector(String),
    /// 页面树的 JSON 序列化或反序列化失败。
    #[error("页面 JSON 错误: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CleanError> for io::Error {
    fn from(err: CleanError) -> Self {
        Self::other(err)
    }
}

//=============================================================================
// 2. 页面树
//=============================================================================

/// 页面中的一个节点。
///
/// 只区分两类节点：承载文本的叶子 (`Text`) 和可以包含子节点的容器 (`Element`)。
/// 注释节点既不承载可见文本也没有子节点，清理时原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// 文本节点
    Text {
        /// 文本内容
        value: String,
    },
    /// 元素节点
    Element(Element),
    /// 注释节点
    Comment {
        /// 注释内容
        value: String,
    },
}

impl Node {
    /// 创建一个文本节点。
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// 创建一个注释节点。
    pub fn comment(value: impl Into<String>) -> Self {
        Self::Comment {
            value: value.into(),
        }
    }

    /// 如果是元素节点，返回其引用。
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// 按文档顺序拼接所有后代文本节点的内容，注释不计入。
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut output = String::new();
        self.collect_text_into(&mut output);
        output
    }

    fn collect_text_into(&self, output: &mut String) {
        match self {
            Self::Text { value } => output.push_str(value),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text_into(output);
                }
            }
            Self::Comment { .. } => {}
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// 页面中的元素，例如 `<div class="md-content">`。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    /// 标签名
    pub tag: String,
    /// `id` 属性
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `class` 属性拆分后的类名列表
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// 其余属性
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
    /// 按文档顺序排列的子节点
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    /// 创建一个没有属性和子节点的元素。
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// 元素是否带有指定的类名。
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

//=============================================================================
// 3. 清理选项
//=============================================================================

/// MkDocs Material 主题中正文区域的选择器。
pub const DEFAULT_CONTENT_SELECTOR: &str = ".md-content";

/// 宿主页面注册清理器时使用的选项。
///
/// 清理规则本身（字符集与正则）是固定的，这里只决定在页面的哪一部分执行清理。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerOptions {
    /// 正文区域的选择器，每次页面加载时只清理第一个匹配的元素。
    pub content_selector: String,
}

impl Default for CleanerOptions {
    fn default() -> Self {
        Self {
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
        }
    }
}
