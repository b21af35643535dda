//! 页面加载事件与清理器的注册。
//!
//! 文档站点的单页导航在每次（虚拟）页面加载后发布一次事件，
//! 清理器通过 [`install`] 显式订阅一次，之后每次事件都会对当前页面的正文区域执行清理。

use std::fmt;

use tracing::{debug, error, info};

use crate::document::Document;
use crate::selector::Selector;
use crate::space_normalizer::clean_chinese_spaces;
use crate::types::{CleanError, CleanerOptions};

/// 页面加载事件的处理函数。
pub type PageHandler = Box<dyn FnMut(&mut Document) -> Result<(), CleanError>>;

/// 订阅的标识，用于在页面卸载时取消订阅。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// 页面加载事件的发布/订阅中心。
///
/// 所有处理函数都在发布事件的线程上同步执行，执行期间独占页面文档。
#[derive(Default)]
pub struct PageEvents {
    next_id: u64,
    handlers: Vec<(SubscriptionId, PageHandler)>,
}

impl fmt::Debug for PageEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageEvents")
            .field("next_id", &self.next_id)
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

impl PageEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// 订阅页面加载事件，处理函数按订阅顺序执行。
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut Document) -> Result<(), CleanError> + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// 取消订阅。返回该订阅此前是否存在。
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        let removed = self.handlers.len() != before;
        if removed {
            info!(?id, "已取消页面加载事件订阅");
        }
        removed
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// 发布一次页面加载事件。
    ///
    /// 某个处理函数失败时只记录错误日志，其余处理函数照常执行。
    /// 返回失败的处理函数数量。
    pub fn publish(&mut self, document: &mut Document) -> usize {
        let mut failed = 0;
        for (id, handler) in &mut self.handlers {
            if let Err(e) = handler(document) {
                error!(?id, "页面加载事件处理失败: {}", e);
                failed += 1;
            }
        }
        failed
    }
}

/// 清理页面中第一个匹配 `selector` 的正文区域。
///
/// 页面中不存在正文区域时直接跳过，返回 `None`；否则返回内容发生变化的文本节点数量。
pub fn clean_content_region(document: &mut Document, selector: &Selector) -> Option<usize> {
    let Some(content) = document.query_selector_mut(selector) else {
        debug!(%selector, "页面中没有正文区域，跳过清理");
        return None;
    };
    Some(clean_chinese_spaces(content))
}

/// 在页面加载事件上注册中文空格清理器。
///
/// 应由宿主页面在初始化时调用一次。
///
/// # 错误
///
/// `options.content_selector` 无法解析时返回 [`CleanError::InvalidSelector`]，此时不会注册任何处理函数。
pub fn install(
    events: &mut PageEvents,
    options: &CleanerOptions,
) -> Result<SubscriptionId, CleanError> {
    let selector = Selector::parse(&options.content_selector)?;
    info!(%selector, "已注册中文空格清理器");
    Ok(events.subscribe(move |document| {
        clean_content_region(document, &selector);
        Ok(())
    }))
}
