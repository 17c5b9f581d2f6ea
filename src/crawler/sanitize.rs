use anyhow::{anyhow, Result};
use log2::debug;
use scraper::{Html, Selector};

/// MediaWiki cruft stripped from every page before it is archived
pub const BOILERPLATE_SELECTORS: &str = ".navbox, .metadata, .mw-references-wrap, script, style, \
    .toc, .infobox, header, footer, .mw-editsection, .sistersitebox";

/// An `<img>` with a usable `src`, tagged with its position among *all* images of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub index: usize,
    pub src: String,
}

/// Cleaned page ready to be archived.
///
/// The tree is kept in serialized form: `scraper::Html` is not `Send`
/// and the page has to travel across `.await` points.
#[derive(Debug, Clone, Default)]
pub struct PageDocument {
    pub markup: String,
    pub images: Vec<ImageSource>,
    /// Raw `href` values in document order, unfiltered
    pub links: Vec<String>,
}

pub struct Sanitizer {
    boilerplate: Selector,
    images: Selector,
    links: Selector,
}

impl Sanitizer {
    pub fn new() -> Result<Self> {
        let parse = |css: &str| {
            Selector::parse(css).map_err(|e| anyhow!("Failed to parse selector {}: {}", css, e))
        };
        Ok(Self {
            boilerplate: parse(BOILERPLATE_SELECTORS)?,
            images: parse("img")?,
            links: parse("a[href]")?,
        })
    }

    /// Never fails: html5ever recovers from any malformed input,
    /// invalid UTF-8 is replaced.
    pub fn sanitize(&self, raw: &[u8]) -> PageDocument {
        let text = String::from_utf8_lossy(raw);
        let mut document = Html::parse_document(&text);

        let boilerplate: Vec<_> = document.select(&self.boilerplate).map(|el| el.id()).collect();
        let comments: Vec<_> = document
            .tree
            .nodes()
            .filter(|node| node.value().is_comment())
            .map(|node| node.id())
            .collect();
        debug!("Removing {} boilerplate subtrees and {} comments", boilerplate.len(), comments.len());

        for id in boilerplate.into_iter().chain(comments) {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }

        // Detached nodes stay in the arena, so walk from the root element from here on
        let root = document.root_element();
        let images = root
            .select(&self.images)
            .enumerate()
            .filter_map(|(index, img)| match img.value().attr("src") {
                Some(src) if !src.is_empty() => Some(ImageSource { index, src: src.to_string() }),
                _ => None,
            })
            .collect();
        let links = root
            .select(&self.links)
            .filter_map(|a| a.value().attr("href"))
            .map(str::to_string)
            .collect();

        PageDocument {
            markup: document.html(),
            images,
            links,
        }
    }
}
