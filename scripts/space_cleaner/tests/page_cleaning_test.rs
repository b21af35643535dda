use anyhow::Result;
use space_cleaner::{
    CleanerOptions, Document, Element, Node, PageEvents, Selector, clean_chinese_spaces,
    clean_content_region, install,
};
use tracing_subscriber::EnvFilter;

const SAMPLE_PAGE: &str = include_str!("sample_page.json");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn content_text(document: &Document) -> Result<String> {
    let selector = Selector::parse(".md-content")?;
    let content = document
        .query_selector(&selector)
        .ok_or_else(|| anyhow::anyhow!("页面中没有正文区域"))?;
    Ok(content.text_content())
}

/// 取出正文区域中第 `index` 个子元素的所有文本节点，保持文档顺序。
fn paragraph_texts(document: &Document, index: usize) -> Vec<String> {
    fn collect(node: &Node, output: &mut Vec<String>) {
        match node {
            Node::Text { value } => output.push(value.clone()),
            Node::Element(element) => element.children.iter().for_each(|c| collect(c, output)),
            Node::Comment { .. } => {}
        }
    }

    let selector = Selector::parse(".md-content").unwrap();
    let mut output = Vec::new();
    if let Some(Node::Element(content)) = document.query_selector(&selector) {
        collect(&content.children[index], &mut output);
    }
    output
}

#[test]
fn test_clean_sample_page_on_page_load() -> Result<()> {
    init_tracing();

    let mut document = Document::from_json(SAMPLE_PAGE)?;
    let mut events = PageEvents::new();
    install(&mut events, &CleanerOptions::default())?;

    assert_eq!(events.publish(&mut document), 0);

    assert_eq!(paragraph_texts(&document, 0), vec!["第一课春"]);
    assert_eq!(
        paragraph_texts(&document, 2),
        vec!["盼望着，盼望着，东风来了，", "春天", "的脚步近了。"]
    );
    assert_eq!(
        paragraph_texts(&document, 3),
        vec!["作者朱自清，写于 1933 年，收入“中学国文”课本。"]
    );
    assert_eq!(
        paragraph_texts(&document, 4),
        vec!["使用 MkDocs Material 构建", "mkdocs build"]
    );

    // 正文区域之外的内容和注释不受影响
    let header = Selector::parse(".md-header")?;
    assert_eq!(
        document.query_selector(&header).map(Node::text_content),
        Some(" 语文 课本 ".to_string())
    );
    if let Some(Node::Element(content)) = document.query_selector(&Selector::parse(".md-content")?) {
        assert_eq!(content.children[1], Node::comment(" 原文 "));
    }

    Ok(())
}

#[test]
fn test_repeated_page_loads_are_idempotent() -> Result<()> {
    init_tracing();

    let mut events = PageEvents::new();
    install(&mut events, &CleanerOptions::default())?;

    let mut once = Document::from_json(SAMPLE_PAGE)?;
    events.publish(&mut once);

    let mut twice = once.clone();
    events.publish(&mut twice);
    assert_eq!(once, twice);

    let selector = Selector::parse(".md-content")?;
    let mut third = twice.clone();
    assert_eq!(clean_content_region(&mut third, &selector), Some(0));
    Ok(())
}

#[test]
fn test_each_page_load_cleans_the_current_page() -> Result<()> {
    let mut events = PageEvents::new();
    install(&mut events, &CleanerOptions::default())?;

    for text in ["第一页 内容", " 第二页 内容 ", "第三页　内容"] {
        let mut document = Document::new(
            Element::new("div")
                .with_class("md-content")
                .with_child(Node::text(text))
                .into(),
        );
        events.publish(&mut document);
        assert!(
            !document.root.text_content().chars().any(char::is_whitespace),
            "{text:?}"
        );
    }
    Ok(())
}

#[test]
fn test_text_nodes_are_cleaned_independently() -> Result<()> {
    // <p>中文<em>强调</em> 中文</p>
    let mut root: Node = Element::new("p")
        .with_child(Node::text("中文"))
        .with_child(Element::new("em").with_child(Node::text("强调")))
        .with_child(Node::text(" 中文"))
        .into();
    clean_chinese_spaces(&mut root);
    assert_eq!(root.text_content(), "中文强调中文");

    // 节点内部的空白按两侧字符判断，节点边界的空白总会被删除，
    // 即使跨节点看它夹在英文与中文之间。
    let mut root: Node = Element::new("p")
        .with_child(Node::text("中文 中文 English "))
        .with_child(Element::new("a").with_child(Node::text("链接")))
        .into();
    clean_chinese_spaces(&mut root);
    assert_eq!(root.text_content(), "中文中文 English链接");

    // 节点之间不会增加或删除任何节点
    let Node::Element(paragraph) = &root else {
        anyhow::bail!("根节点应为元素");
    };
    assert_eq!(paragraph.children.len(), 2);
    Ok(())
}

#[test]
fn test_missing_content_region_is_a_no_op() -> Result<()> {
    init_tracing();

    let mut events = PageEvents::new();
    install(&mut events, &CleanerOptions::default())?;

    let mut document = Document::new(
        Element::new("body")
            .with_child(
                Element::new("div")
                    .with_class("md-sidebar")
                    .with_child(Node::text(" 目录 一 ")),
            )
            .into(),
    );
    let before = document.clone();

    assert_eq!(events.publish(&mut document), 0);
    assert_eq!(document, before);
    Ok(())
}

#[test]
fn test_custom_content_selector() -> Result<()> {
    let options: CleanerOptions = serde_json::from_str(r##"{ "content_selector": "article#main" }"##)?;
    let mut events = PageEvents::new();
    install(&mut events, &options)?;

    let mut document = Document::from_json(SAMPLE_PAGE)?;
    let before = content_text(&document)?;
    events.publish(&mut document);
    assert_eq!(content_text(&document)?, before);

    let mut document = Document::new(
        Element::new("article")
            .with_id("main")
            .with_child(Node::text(" 正文 "))
            .into(),
    );
    events.publish(&mut document);
    assert_eq!(document.root.text_content(), "正文");
    Ok(())
}
