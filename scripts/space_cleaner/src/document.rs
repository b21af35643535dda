//! 页面文档及元素查询。

use serde::{Deserialize, Serialize};

use crate::selector::Selector;
use crate::types::{CleanError, Node};

/// 一个已渲染的页面。
///
/// 序列化时就是根节点本身。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub root: Node,
}

impl Document {
    pub const fn new(root: Node) -> Self {
        Self { root }
    }

    /// 从 JSON 形式的页面树构建文档。
    ///
    /// # 错误
    ///
    /// JSON 格式不符合页面树结构时返回 [`CleanError::Json`]。
    pub fn from_json(json: &str) -> Result<Self, CleanError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 将文档序列化为 JSON。
    ///
    /// # 错误
    ///
    /// 序列化失败时返回 [`CleanError::Json`]。
    pub fn to_json(&self) -> Result<String, CleanError> {
        Ok(serde_json::to_string(self)?)
    }

    /// 按文档顺序（先序遍历，包括根节点）返回第一个匹配 `selector` 的元素节点。
    #[must_use]
    pub fn query_selector(&self, selector: &Selector) -> Option<&Node> {
        find_first(&self.root, selector)
    }

    /// [`Document::query_selector`] 的可变版本。
    pub fn query_selector_mut(&mut self, selector: &Selector) -> Option<&mut Node> {
        find_first_mut(&mut self.root, selector)
    }
}

fn find_first<'a>(node: &'a Node, selector: &Selector) -> Option<&'a Node> {
    let Node::Element(element) = node else {
        return None;
    };
    if selector.matches(element) {
        return Some(node);
    }
    element
        .children
        .iter()
        .find_map(|child| find_first(child, selector))
}

fn find_first_mut<'a>(node: &'a mut Node, selector: &Selector) -> Option<&'a mut Node> {
    if matches!(&*node, Node::Element(element) if selector.matches(element)) {
        return Some(node);
    }
    match node {
        Node::Element(element) => element
            .children
            .iter_mut()
            .find_map(|child| find_first_mut(child, selector)),
        Node::Text { .. } | Node::Comment { .. } => None,
    }
}
